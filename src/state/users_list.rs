use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{
    program_error::ProgramError,
    program_pack::{IsInitialized, Pack, Sealed},
    pubkey::{Pubkey, PUBKEY_BYTES},
};

use crate::error::ProfileError;

/// maximum number of users the registry can hold
pub const MAX_USERS: usize = 250;
const USERS_BYTES: usize = PUBKEY_BYTES * MAX_USERS;

/// singleton registry of every user that currently has a profile.
///
/// the account is allocated at its full size on initialization, the layout is
///
/// ```text
/// 0    [1]    is_initialized
/// 1    [1]    bump
/// 2    [2]    number of registered users (le)
/// 4    [8000] registered user keys, unused slots are zeroed
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsersList {
    pub is_initialized: bool,
    /// bump used to derive the users list pda
    pub bump: u8,
    /// registered users in registration order
    pub users: Vec<Pubkey>,
}

impl UsersList {
    pub const fn size() -> usize {
        1 + 1 + 2 + USERS_BYTES
    }
    pub const fn seed() -> &'static [u8] {
        b"users_list"
    }
    /// the users list address is derived from the program id itself, so there is exactly
    /// one per deployment
    pub fn derive(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::seed(), program_id.as_ref()], program_id)
    }
    pub fn create_pda(program_id: &Pubkey, bump: u8) -> Result<Pubkey, ProgramError> {
        Pubkey::create_program_address(&[Self::seed(), program_id.as_ref(), &[bump]], program_id)
            .map_err(|_| ProfileError::InvalidPda.into())
    }
    pub fn contains(&self, user: &Pubkey) -> bool {
        self.users.contains(user)
    }
    /// appends the user, rejecting duplicates and registrations past capacity
    pub fn register(&mut self, user: Pubkey) -> Result<(), ProfileError> {
        if self.contains(&user) {
            return Err(ProfileError::DuplicateUser);
        }
        if self.users.len() >= MAX_USERS {
            return Err(ProfileError::UserListFull);
        }
        self.users.push(user);
        Ok(())
    }
    /// removes the user while preserving the registration order of everyone else
    pub fn unregister(&mut self, user: &Pubkey) -> Result<(), ProfileError> {
        let pos = self
            .users
            .iter()
            .position(|u| u.eq(user))
            .ok_or(ProfileError::UserNotFound)?;
        self.users.remove(pos);
        Ok(())
    }
}

impl Sealed for UsersList {}
impl IsInitialized for UsersList {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}
impl Pack for UsersList {
    const LEN: usize = UsersList::size();
    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        let src = array_ref![src, 0, UsersList::size()];
        let (is_initialized, bump, count, users) = array_refs![src, 1, 1, 2, USERS_BYTES];
        let count = u16::from_le_bytes(*count) as usize;
        if count > MAX_USERS {
            return Err(ProgramError::InvalidAccountData);
        }
        let is_initialized = match is_initialized[0] {
            0 => false,
            1 => true,
            _ => return Err(ProgramError::InvalidAccountData),
        };
        let users = users
            .chunks_exact(PUBKEY_BYTES)
            .take(count)
            .map(|key| Pubkey::new_from_array(*array_ref![key, 0, PUBKEY_BYTES]))
            .collect();
        Ok(Self {
            is_initialized,
            bump: bump[0],
            users,
        })
    }
    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, UsersList::size()];
        let (_is_initialized, _bump, _count, _users) = mut_array_refs![dst, 1, 1, 2, USERS_BYTES];

        let UsersList {
            ref is_initialized,
            ref bump,
            ref users,
        } = self;
        _is_initialized[0] = *is_initialized as u8;
        _bump[0] = *bump;
        _count.copy_from_slice(&(users.len() as u16).to_le_bytes());
        // zero the whole key region so removed users never linger past the count
        _users.fill(0);
        for (slot, user) in _users.chunks_exact_mut(PUBKEY_BYTES).zip(users.iter()) {
            slot.copy_from_slice(user.as_ref());
        }
    }
}
