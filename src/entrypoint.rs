// Import essential types and modules from the Solana runtime
use solana_program::{
  account_info::AccountInfo,              // Represents an account's metadata (key, owner, data, etc.)
  entrypoint::{ProgramResult, SUCCESS},   // Standard return type and the status for a clean run
  msg,                                    // Logging macro
  pubkey::Pubkey,                         // Public key type used across Solana (for accounts, owners)
};

use crate::input::Input;                  // Bounds-checked view of the raw input buffer
use crate::processor;                     // Where the counter actually gets bumped

// Define the program's entry point using the Solana macro, unless linked as a library
#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_entry);

fn log_entry() {
  msg!("Aviata insurance program entrypoint");
}

/// Called by the runtime once the loader has deserialized the accounts.
pub fn process_entry(
  program_id: &Pubkey,                    // The program ID that owns this execution context
  accounts: &[AccountInfo],               // Accounts involved in the instruction
  instruction_data: &[u8],                // Raw instruction data, unused by this program
) -> ProgramResult {
  log_entry();

  // Delegate the real processing work to the processor
  processor::process_instruction(program_id, accounts, instruction_data)
}

/// Runs the program against a serialized input buffer and returns the status
/// code the runtime would see. Account data is updated in place in `input`.
pub fn process_input(input: &mut [u8]) -> u64 {
  log_entry();

  let mut input = match Input::deserialize(input) {
    Ok(input) => input,
    Err(error) => return error.into(),
  };

  let accounts: Vec<AccountInfo> = input
    .accounts
    .iter_mut()
    .map(|account| account.account_info())
    .collect();

  match processor::process_instruction(&input.program_id, &accounts, input.instruction_data) {
    Ok(()) => SUCCESS,
    Err(error) => error.into(),
  }
}
