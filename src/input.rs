//! Input buffer handed to the program by the loader.
//!
//! The runtime serializes the instruction as
//!
//! ```text
//! u64 number of accounts
//! per account:
//!   u8  duplicate marker (NON_DUP_MARKER, or the index of the original + 7 bytes padding)
//!   u8  is_signer, u8 is_writable, u8 executable, 4 bytes padding
//!   32  key, 32 owner
//!   u64 lamports
//!   u64 data length, data, MAX_PERMITTED_DATA_INCREASE bytes, padding to BPF_ALIGN_OF_U128
//!   u64 rent epoch
//! u64 instruction data length, instruction data
//! 32  program id
//! ```
//!
//! [`Input::deserialize`] walks that layout over a byte slice with every read
//! bounds-checked, keeping at most [`MAX_ACCOUNTS`] accounts.

use std::mem;

use solana_program::{
  account_info::AccountInfo,
  clock::Epoch,
  entrypoint::{BPF_ALIGN_OF_U128, MAX_PERMITTED_DATA_INCREASE, NON_DUP_MARKER},
  program_error::ProgramError,
  pubkey::Pubkey,
};

/// Number of accounts the program accepts. Anything above is a malformed call.
pub const MAX_ACCOUNTS: usize = 1;

/// Deserialized parameters the processor works with.
pub struct Parameters<'a, 'info> {
  pub program_id: &'a Pubkey,
  pub accounts: &'a [AccountInfo<'info>],   // never longer than MAX_ACCOUNTS
  pub instruction_data: &'a [u8],
}

impl<'a, 'info> Parameters<'a, 'info> {
  /// Wraps the accounts the runtime passed in, refusing more than [`MAX_ACCOUNTS`].
  pub fn new(
    program_id: &'a Pubkey,
    accounts: &'a [AccountInfo<'info>],
    instruction_data: &'a [u8],
  ) -> Result<Self, ProgramError> {
    if accounts.len() > MAX_ACCOUNTS {
      return Err(ProgramError::InvalidArgument);
    }

    Ok(Parameters {
      program_id,
      accounts,
      instruction_data,
    })
  }
}

/// An account as laid out in the input buffer. Data is borrowed in place so
/// the runtime sees writes once the program returns.
pub struct SerializedAccount<'a> {
  pub key: Pubkey,
  pub owner: Pubkey,
  pub lamports: u64,
  pub data: &'a mut [u8],
  pub is_signer: bool,
  pub is_writable: bool,
  pub executable: bool,
  pub rent_epoch: Epoch,
}

impl<'a> SerializedAccount<'a> {
  /// Borrows the account as the runtime's `AccountInfo`.
  pub fn account_info(&mut self) -> AccountInfo<'_> {
    AccountInfo::new(
      &self.key,
      self.is_signer,
      self.is_writable,
      &mut self.lamports,
      &mut *self.data,
      &self.owner,
      self.executable,
      self.rent_epoch,
    )
  }
}

/// Fixed capacity account list.
pub struct AccountList<'a> {
  slots: [Option<SerializedAccount<'a>>; MAX_ACCOUNTS],
}

impl<'a> AccountList<'a> {
  fn empty() -> Self {
    AccountList {
      slots: std::array::from_fn(|_| None),
    }
  }

  pub fn len(&self) -> usize {
    self.slots.iter().flatten().count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn iter(&self) -> impl Iterator<Item = &SerializedAccount<'a>> {
    self.slots.iter().flatten()
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SerializedAccount<'a>> {
    self.slots.iter_mut().flatten()
  }
}

/// The whole input buffer, deserialized.
pub struct Input<'a> {
  pub program_id: Pubkey,
  pub accounts: AccountList<'a>,
  pub instruction_data: &'a [u8],
}

impl<'a> Input<'a> {
  /// Parses the loader's input buffer.
  ///
  /// Fails with `InvalidArgument` when the buffer is truncated, declares more
  /// than [`MAX_ACCOUNTS`] accounts, or marks an account as a duplicate.
  pub fn deserialize(input: &'a mut [u8]) -> Result<Self, ProgramError> {
    let mut cursor = Cursor::new(input);

    let num_accounts = cursor.read_len()?;
    if num_accounts > MAX_ACCOUNTS {
      return Err(ProgramError::InvalidArgument);
    }

    let mut accounts = AccountList::empty();
    for slot in accounts.slots.iter_mut().take(num_accounts) {
      *slot = Some(cursor.read_account()?);
    }

    let instruction_data_len = cursor.read_len()?;
    let instruction_data: &'a [u8] = cursor.take(instruction_data_len)?;
    let program_id = cursor.read_pubkey()?;

    Ok(Input {
      program_id,
      accounts,
      instruction_data,
    })
  }
}

/// Serializes accounts and instruction data the way the loader does.
///
/// Hosts that embed the program (and tests) use this to build the buffer
/// handed to [`crate::entrypoint::process_input`].
pub fn serialize(program_id: &Pubkey, accounts: &[AccountInfo], instruction_data: &[u8]) -> Vec<u8> {
  let mut buffer = Vec::new();
  buffer.extend_from_slice(&(accounts.len() as u64).to_le_bytes());

  for account in accounts {
    let data = account.data.borrow();

    buffer.push(NON_DUP_MARKER);
    buffer.push(account.is_signer as u8);
    buffer.push(account.is_writable as u8);
    buffer.push(account.executable as u8);
    buffer.extend_from_slice(&[0u8; 4]);
    buffer.extend_from_slice(account.key.as_ref());
    buffer.extend_from_slice(account.owner.as_ref());
    buffer.extend_from_slice(&account.lamports().to_le_bytes());
    buffer.extend_from_slice(&(data.len() as u64).to_le_bytes());
    buffer.extend_from_slice(&data);
    buffer.resize(buffer.len() + MAX_PERMITTED_DATA_INCREASE, 0);
    buffer.resize(buffer.len() + padding(buffer.len()), 0);
    buffer.extend_from_slice(&account.rent_epoch.to_le_bytes());
  }

  buffer.extend_from_slice(&(instruction_data.len() as u64).to_le_bytes());
  buffer.extend_from_slice(instruction_data);
  buffer.extend_from_slice(program_id.as_ref());
  buffer
}

fn padding(offset: usize) -> usize {
  (BPF_ALIGN_OF_U128 - offset % BPF_ALIGN_OF_U128) % BPF_ALIGN_OF_U128
}

// Splits the buffer front to back so account data can stay mutably borrowed
struct Cursor<'a> {
  rest: &'a mut [u8],
  offset: usize,
}

impl<'a> Cursor<'a> {
  fn new(input: &'a mut [u8]) -> Self {
    Cursor { rest: input, offset: 0 }
  }

  fn take(&mut self, len: usize) -> Result<&'a mut [u8], ProgramError> {
    if self.rest.len() < len {
      return Err(ProgramError::InvalidArgument);
    }
    let (head, tail) = mem::take(&mut self.rest).split_at_mut(len);
    self.rest = tail;
    self.offset += len;
    Ok(head)
  }

  fn read_u8(&mut self) -> Result<u8, ProgramError> {
    Ok(self.take(1)?[0])
  }

  fn read_u64(&mut self) -> Result<u64, ProgramError> {
    let bytes = self.take(8)?;
    Ok(u64::from_le_bytes(bytes.try_into().map_err(|_| ProgramError::InvalidArgument)?))
  }

  fn read_len(&mut self) -> Result<usize, ProgramError> {
    usize::try_from(self.read_u64()?).map_err(|_| ProgramError::InvalidArgument)
  }

  fn read_pubkey(&mut self) -> Result<Pubkey, ProgramError> {
    let bytes = self.take(32)?;
    Pubkey::try_from(&*bytes).map_err(|_| ProgramError::InvalidArgument)
  }

  fn align(&mut self) -> Result<(), ProgramError> {
    self.take(padding(self.offset)).map(|_| ())
  }

  fn read_account(&mut self) -> Result<SerializedAccount<'a>, ProgramError> {
    // A single slot can't refer back to an earlier account
    if self.read_u8()? != NON_DUP_MARKER {
      return Err(ProgramError::InvalidArgument);
    }

    let is_signer = self.read_u8()? != 0;
    let is_writable = self.read_u8()? != 0;
    let executable = self.read_u8()? != 0;
    self.take(4)?;

    let key = self.read_pubkey()?;
    let owner = self.read_pubkey()?;
    let lamports = self.read_u64()?;

    let data_len = self.read_len()?;
    let data = self.take(data_len)?;
    self.take(MAX_PERMITTED_DATA_INCREASE)?;
    self.align()?;

    let rent_epoch = self.read_u64()?;

    Ok(SerializedAccount {
      key,
      owner,
      lamports,
      data,
      is_signer,
      is_writable,
      executable,
      rent_epoch,
    })
  }
}
