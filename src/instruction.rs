use solana_program::{
  instruction::{AccountMeta, Instruction},          // For building instructions to send to the blockchain
  pubkey::Pubkey,                                  // For identifying accounts and programs
};

// Insure a flight, i.e. bump the counter in the Aviata account.
// Accounts:
// 0. [writable] The Aviata account, owned by the program, at least FlightCounter::LEN bytes
// Instruction data: none
pub fn insure_flight(program_id: &Pubkey, aviata_account: &Pubkey) -> Instruction {
  Instruction {
    program_id: *program_id,
    accounts: vec![AccountMeta::new(*aviata_account, false)],
    data: Vec::new(),
  }
}
