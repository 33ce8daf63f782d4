// Import the program id macro from the Solana runtime
use solana_program::declare_id;

// Declare separate modules for organization and maintainability

pub mod entrypoint;                           // The exported `entrypoint` symbol and the byte-buffer entry
pub mod input;                                // Bounded (de)serialization of the loader's input buffer
pub mod instruction;                          // Builds the single instruction clients send to the program
pub mod processor;                            // Contains the core logic: bump the flights insured counter
pub mod state;                                // Defines the account layout, i.e. the FlightCounter

// Address the program is deployed at, used by clients and tests
declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");
