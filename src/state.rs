// Import core traits and types from Solana's program SDK
use solana_program::{
  program_error::ProgramError,                                            // Error returned when the account data can't be decoded
  program_pack::{Pack, Sealed},                                           // Traits for (de)serializing account data
};

// Import helper macros to safely work with byte arrays often used in manual serialization/deserialization
use arrayref::{array_mut_ref, array_ref};

// Define the FlightCounter struct, the only thing this program keeps in an account
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlightCounter {
  pub flights_insured: u32,                // Number of flights insured through Aviata so far
}

impl FlightCounter {
  /// Returns the counter after one more insured flight, wrapping to zero past `u32::MAX`.
  pub fn insure_one(self) -> Self {
    FlightCounter {
      flights_insured: self.flights_insured.wrapping_add(1),
    }
  }
}

// Empty implementation of the Sealed trait, required to implement Pack
impl Sealed for FlightCounter {}

// Implements the Pack trait, which defines how to serialize/deserialize the FlightCounter struct.
// Only the first LEN bytes are touched; anything the account holds past them is left alone.
impl Pack for FlightCounter {
  // 4 bytes for the little-endian u32
  const LEN: usize = 4;

  fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
    // array_ref! panics on short input, so refuse it here
    if src.len() < FlightCounter::LEN {
      return Err(ProgramError::InvalidAccountData);
    }

    let flights_insured = array_ref![src, 0, FlightCounter::LEN];

    Ok(FlightCounter {
      flights_insured: u32::from_le_bytes(*flights_insured),
    })
  }

  fn pack_into_slice(&self, dst: &mut [u8]) {
    let flights_insured_dst = array_mut_ref![dst, 0, FlightCounter::LEN];
    *flights_insured_dst = self.flights_insured.to_le_bytes();
  }
}
