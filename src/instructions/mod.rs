/// creates a profile and registers its owner
pub mod create_profile;
/// closes a profile and unregisters its owner
pub mod delete_profile;
/// follow and unfollow other users
pub mod follow_user;
/// allocates the users list
pub mod initialize;
/// partially overwrites profile fields
pub mod update_profile;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::{
    error::ProfileError,
    state::user_profile::{NewProfile, ProfileUpdate},
};

/// Instructions supported by the user profiles program
///
/// Instruction data is the borsh encoding of this enum, so the first byte is the variant index
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ProfileIx {
    /// Allocates the users list, once per deployment
    /// Accounts expected by this instruction:
    ///
    ///   0. `[writable, signer]` payer
    ///   1. `[writable]`         users_list
    ///   2. `[]`                 system_program
    ///
    Initialize,
    /// Creates the signer's profile and appends the signer to the users list
    /// Accounts expected by this instruction:
    ///
    ///   0. `[writable, signer]` user
    ///   1. `[writable]`         user_profile
    ///   2. `[writable]`         users_list
    ///   3. `[]`                 system_program
    ///
    CreateProfile { fields: NewProfile },
    /// Overwrites the supplied fields of the signer's profile
    /// Accounts expected by this instruction:
    ///
    ///   0. `[signer]`   user
    ///   1. `[writable]` user_profile
    ///
    UpdateProfile { fields: ProfileUpdate },
    /// Closes the signer's profile, refunding rent to the signer, and removes
    /// the signer from the users list
    /// Accounts expected by this instruction:
    ///
    ///   0. `[writable, signer]` user
    ///   1. `[writable]`         user_profile
    ///   2. `[writable]`         users_list
    ///
    DeleteProfile,
    /// Adds `target` to the signer's following list
    /// Accounts expected by this instruction:
    ///
    ///   0. `[signer]`   user
    ///   1. `[writable]` user_profile
    ///   2. `[]`         target_profile
    ///
    FollowUser { target: Pubkey },
    /// Removes `target` from the signer's following list
    /// Accounts expected by this instruction:
    ///
    ///   0. `[signer]`   user
    ///   1. `[writable]` user_profile
    ///
    UnfollowUser { target: Pubkey },
}

impl ProfileIx {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProfileError::InvalidInstruction.into())
    }
    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        self.try_to_vec()
            .map_err(|e| ProgramError::BorshIoError(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn test_variant_tags() {
        assert_eq!(ProfileIx::Initialize.pack().unwrap(), vec![0]);
        assert_eq!(ProfileIx::DeleteProfile.pack().unwrap(), vec![3]);
        let target = Pubkey::new_unique();
        let packed = ProfileIx::FollowUser { target }.pack().unwrap();
        assert_eq!(packed[0], 4);
        assert_eq!(&packed[1..], target.as_ref());
    }
    #[test]
    fn test_create_profile_pack_unpack() {
        let ix = ProfileIx::CreateProfile {
            fields: NewProfile {
                nickname: "TestUser".to_string(),
                description: "This is a test user".to_string(),
                twitter_link: "https://twitter.com/test".to_string(),
                website_link: "https://test.com".to_string(),
                email: "test@test.com".to_string(),
                pic: Some("QmPic".to_string()),
                avatar: None,
            },
        };
        let packed_ix = ix.pack().unwrap();
        assert_eq!(packed_ix[0], 1);
        assert_eq!(ProfileIx::unpack(&packed_ix).unwrap(), ix);
    }
    #[test]
    fn test_unpack_invalid() {
        assert_eq!(
            ProfileIx::unpack(&[]).unwrap_err(),
            ProgramError::from(ProfileError::InvalidInstruction)
        );
        assert_eq!(
            ProfileIx::unpack(&[6]).unwrap_err(),
            ProgramError::from(ProfileError::InvalidInstruction)
        );
        // trailing bytes are rejected
        assert!(ProfileIx::unpack(&[0, 0]).is_err());
    }
}
