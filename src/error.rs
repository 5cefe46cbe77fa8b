use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    #[error("users list is already initialized")]
    AlreadyInitialized,
    #[error("a profile already exists for this user")]
    AlreadyExists,
    #[error("user is already registered in the users list")]
    DuplicateUser,
    #[error("profile not found")]
    NotFound,
    #[error("user is not registered in the users list")]
    UserNotFound,
    /// returned when the signer is not the owner of the profile being mutated
    #[error("access denied")]
    Unauthorized,
    #[error("target user has no profile")]
    TargetNotFound,
    #[error("users can not follow themselves")]
    SelfFollow,
    #[error("target user is not being followed")]
    NotFollowing,
    #[error("user list is full")]
    UserListFull,
    #[error("following list is full")]
    FollowingListFull,
    /// a text field exceeded the byte budget reserved for it in the profile account
    #[error("field {field} is {len} bytes, max {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("account does not match the derived program address")]
    InvalidPda,
    #[error("users list has not been initialized")]
    RegistryNotInitialized,
    #[error("invalid instruction data")]
    InvalidInstruction,
}

impl ProfileError {
    /// stable numeric code surfaced as `ProgramError::Custom`
    pub const fn code(&self) -> u32 {
        match self {
            Self::AlreadyInitialized => 0,
            Self::AlreadyExists => 1,
            Self::DuplicateUser => 2,
            Self::NotFound => 3,
            Self::UserNotFound => 4,
            Self::Unauthorized => 5,
            Self::TargetNotFound => 6,
            Self::SelfFollow => 7,
            Self::NotFollowing => 8,
            Self::UserListFull => 9,
            Self::FollowingListFull => 10,
            Self::FieldTooLong { .. } => 11,
            Self::InvalidPda => 12,
            Self::RegistryNotInitialized => 13,
            Self::InvalidInstruction => 14,
        }
    }
}

impl From<ProfileError> for ProgramError {
    fn from(value: ProfileError) -> Self {
        solana_program::log::sol_log(&value.to_string());
        Self::Custom(value.code())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn test_program_error_codes() {
        assert_eq!(
            ProgramError::from(ProfileError::AlreadyInitialized),
            ProgramError::Custom(0)
        );
        assert_eq!(
            ProgramError::from(ProfileError::FieldTooLong {
                field: "nickname",
                len: 40,
                max: 32
            }),
            ProgramError::Custom(11)
        );
        assert_eq!(
            ProgramError::from(ProfileError::InvalidInstruction),
            ProgramError::Custom(14)
        );
    }
    #[test]
    fn test_display_field_too_long() {
        let err = ProfileError::FieldTooLong {
            field: "email",
            len: 65,
            max: 64,
        };
        assert_eq!(err.to_string(), "field email is 65 bytes, max 64");
    }
}
