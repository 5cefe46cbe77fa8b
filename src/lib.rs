//! user_profiles implements an on-chain registry of user identities, where each registered
//! identity owns a profile account holding public profile data and the set of users it follows.

/// entrypoint for the solana program
#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint;
/// error types
pub mod error;
/// instruction definitions and helper functions
pub mod instructions;
/// unpacks instruction data and routes to instruction handler
pub mod processor;
/// account state objects
pub mod state;
/// pda derivation and account lifecycle helpers
pub mod utils;


solana_program::declare_id!("Dpn8XGzXTGErx71SDLxuzVCDwJDKF79sE42r9qoY5Wpf");
