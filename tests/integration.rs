use aviata_insurance::{entrypoint::process_entry, instruction::insure_flight, state::FlightCounter};
use solana_program::program_pack::Pack;
use solana_program_test::{
  processor, tokio, BanksClientError, ProgramTest, ProgramTestContext,
};
use solana_sdk::{
  account::Account,
  instruction::{Instruction, InstructionError},
  pubkey::Pubkey,
  rent::Rent,
  signer::Signer,
  transaction::{Transaction, TransactionError},
};

fn validator() -> ProgramTest {
  let mut validator = ProgramTest::default();
  validator.add_program(
    "aviata_insurance",
    aviata_insurance::id(),
    processor!(process_entry),
  );
  validator
}

fn add_account(validator: &mut ProgramTest, owner: Pubkey, data: Vec<u8>) -> Pubkey {
  let pubkey = Pubkey::new_unique();
  validator.add_account(
    pubkey,
    Account {
      lamports: Rent::default().minimum_balance(data.len()),
      data,
      owner,
      executable: false,
      rent_epoch: 0,
    },
  );
  pubkey
}

async fn send(
  context: &mut ProgramTestContext,
  instructions: &[Instruction],
) -> Result<(), BanksClientError> {
  let tx = Transaction::new_signed_with_payer(
    instructions,
    Some(&context.payer.pubkey()),
    &[&context.payer],
    context.last_blockhash,
  );
  context.banks_client.process_transaction(tx).await
}

async fn account_data(context: &mut ProgramTestContext, pubkey: Pubkey) -> Vec<u8> {
  context
    .banks_client
    .get_account(pubkey)
    .await
    .unwrap()
    .unwrap()
    .data
}

fn instruction_error(err: BanksClientError) -> InstructionError {
  match err.unwrap() {
    TransactionError::InstructionError(0, error) => error,
    other => panic!("unexpected transaction error: {other:?}"),
  }
}

#[tokio::test]
async fn insures_flights() {
  let mut validator = validator();
  let aviata = add_account(&mut validator, aviata_insurance::id(), vec![0; FlightCounter::LEN]);
  let mut context = validator.start_with_context().await;

  send(&mut context, &[insure_flight(&aviata_insurance::id(), &aviata)])
    .await
    .unwrap();

  let counter = FlightCounter::unpack_from_slice(&account_data(&mut context, aviata).await).unwrap();
  assert_eq!(counter.flights_insured, 1);
}

#[tokio::test]
async fn successive_calls_accumulate() {
  let mut validator = validator();
  let aviata = add_account(&mut validator, aviata_insurance::id(), 7u32.to_le_bytes().to_vec());
  let mut context = validator.start_with_context().await;

  let ix = insure_flight(&aviata_insurance::id(), &aviata);
  send(&mut context, &[ix.clone(), ix]).await.unwrap();

  assert_eq!(account_data(&mut context, aviata).await, 9u32.to_le_bytes());
}

#[tokio::test]
async fn wraps_and_keeps_trailing_bytes() {
  let mut validator = validator();
  let aviata = add_account(
    &mut validator,
    aviata_insurance::id(),
    vec![0xFF, 0xFF, 0xFF, 0xFF, 1, 2, 3, 4],
  );
  let mut context = validator.start_with_context().await;

  send(&mut context, &[insure_flight(&aviata_insurance::id(), &aviata)])
    .await
    .unwrap();

  assert_eq!(account_data(&mut context, aviata).await, [0, 0, 0, 0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn no_accounts() {
  let mut context = validator().start_with_context().await;
  let ix = Instruction {
    program_id: aviata_insurance::id(),
    accounts: vec![],
    data: vec![],
  };

  let err = send(&mut context, &[ix]).await.unwrap_err();
  assert_eq!(instruction_error(err), InstructionError::NotEnoughAccountKeys);
}

#[tokio::test]
async fn account_owned_by_someone_else() {
  let mut validator = validator();
  let aviata = add_account(&mut validator, Pubkey::new_unique(), 5u32.to_le_bytes().to_vec());
  let mut context = validator.start_with_context().await;

  let err = send(&mut context, &[insure_flight(&aviata_insurance::id(), &aviata)])
    .await
    .unwrap_err();
  assert_eq!(instruction_error(err), InstructionError::IncorrectProgramId);
  assert_eq!(account_data(&mut context, aviata).await, 5u32.to_le_bytes());
}

#[tokio::test]
async fn account_too_small() {
  let mut validator = validator();
  let aviata = add_account(&mut validator, aviata_insurance::id(), vec![1, 2, 3]);
  let mut context = validator.start_with_context().await;

  let err = send(&mut context, &[insure_flight(&aviata_insurance::id(), &aviata)])
    .await
    .unwrap_err();
  assert_eq!(instruction_error(err), InstructionError::InvalidAccountData);
  assert_eq!(account_data(&mut context, aviata).await, [1, 2, 3]);
}

#[tokio::test]
async fn more_accounts_than_declared() {
  let mut validator = validator();
  let aviata = add_account(&mut validator, aviata_insurance::id(), vec![0; 4]);
  let extra = add_account(&mut validator, aviata_insurance::id(), vec![0; 4]);
  let mut context = validator.start_with_context().await;

  let mut ix = insure_flight(&aviata_insurance::id(), &aviata);
  ix.accounts.push(solana_sdk::instruction::AccountMeta::new(extra, false));

  let err = send(&mut context, &[ix]).await.unwrap_err();
  assert_eq!(instruction_error(err), InstructionError::InvalidArgument);
  assert_eq!(account_data(&mut context, aviata).await, [0, 0, 0, 0]);
}
