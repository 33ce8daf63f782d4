// Core Solana modules for handling programs and accounts
use solana_program::{
  account_info::AccountInfo,                              // Account handed over by the runtime
  entrypoint::ProgramResult,                              // Type for Result<(), ProgramError>
  msg,                                                    // Logging macro for debugging
  program_error::ProgramError,                            // Standard error type
  program_pack::Pack,                                     // (De)serialization of the counter
  pubkey::Pubkey,                                         // Public key type used for account IDs
};

// Import your program-specific types
use crate::input::Parameters;                             // Bounded view over the accounts passed in
use crate::state::FlightCounter;                          // Flights insured counter layout

// Main entry point for the program's logic
pub fn process_instruction(
  program_id: &Pubkey,                                  // The public key of this program
  accounts: &[AccountInfo],                             // Accounts passed into the transaction
  instruction_data: &[u8],                              // Carries nothing the program reads
) -> ProgramResult {
  // Refuse more accounts than the program declares before touching any of them
  let params = Parameters::new(program_id, accounts, instruction_data)?;

  // There is a single instruction, so no dispatch
  insure_flight(&params)
}

/// Records one more insured flight in `accounts[0]`.
pub fn insure_flight(params: &Parameters) -> ProgramResult {
  // Account 0: the Aviata account holding the counter
  let aviata_account = match params.accounts.first() {
    Some(account) => account,
    None => {
      msg!("Aviata account not included in the instruction");
      return Err(ProgramError::NotEnoughAccountKeys);
    }
  };

  // The account must be owned by the program in order to modify its data
  if aviata_account.owner != params.program_id {
    msg!("Aviata account does not have the correct program id");
    return Err(ProgramError::IncorrectProgramId);
  }

  let mut data = aviata_account.try_borrow_mut_data()?;

  // The data must be large enough to hold a u32 value
  if data.len() < FlightCounter::LEN {
    msg!("Aviata account data length too small to hold u32 value");
    return Err(ProgramError::InvalidAccountData);
  }

  // Increment and store the number of flights insured
  let counter = FlightCounter::unpack_from_slice(&data)?.insure_one();
  counter.pack_into_slice(&mut data);

  msg!("Done!");

  Ok(())
}
