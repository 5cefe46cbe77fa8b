use solana_program::{
    account_info::{next_account_info, AccountInfo},
    instruction::{AccountMeta, Instruction},
    log::sol_log as log,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use super::ProfileIx;
use crate::{
    error::ProfileError,
    state::user_profile::UserProfile,
    utils::{check_signer, is_allocated, load_owned_profile},
};

pub struct FollowUserAccountMeta {
    pub user: Pubkey,
    pub user_profile: Pubkey,
    pub target_profile: Pubkey,
}

impl FollowUserAccountMeta {
    pub fn new(user: Pubkey, target: Pubkey) -> Self {
        Self {
            user,
            user_profile: UserProfile::derive(&user, &crate::id()).0,
            target_profile: UserProfile::derive(&target, &crate::id()).0,
        }
    }
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.user, true),
            AccountMeta::new(self.user_profile, false),
            AccountMeta::new_readonly(self.target_profile, false),
        ]
    }
}

pub struct UnfollowUserAccountMeta {
    pub user: Pubkey,
    pub user_profile: Pubkey,
}

impl UnfollowUserAccountMeta {
    pub fn new(user: Pubkey) -> Self {
        Self {
            user,
            user_profile: UserProfile::derive(&user, &crate::id()).0,
        }
    }
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.user, true),
            AccountMeta::new(self.user_profile, false),
        ]
    }
}

/// builds the instruction making `user` follow `target`
pub fn follow_user(user: Pubkey, target: Pubkey) -> Result<Instruction, ProgramError> {
    Ok(Instruction::new_with_bytes(
        crate::id(),
        &ProfileIx::FollowUser { target }.pack()?,
        FollowUserAccountMeta::new(user, target).to_account_metas(),
    ))
}

/// builds the instruction making `user` stop following `target`
pub fn unfollow_user(user: Pubkey, target: Pubkey) -> Result<Instruction, ProgramError> {
    Ok(Instruction::new_with_bytes(
        crate::id(),
        &ProfileIx::UnfollowUser { target }.pack()?,
        UnfollowUserAccountMeta::new(user).to_account_metas(),
    ))
}

/// handler adding a user to the signer's following list. following an already
/// followed user succeeds without changing the list
///
/// accounts
///     0 [signer]    - user
///     1 [writeable] - user_profile
///     2 []          - target_profile
pub fn handle_follow_user(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    ix: ProfileIx,
) -> Result<(), ProgramError> {
    let ProfileIx::FollowUser { target } = ix else {
        return Err(ProgramError::InvalidArgument);
    };
    let account_iter = &mut accounts.iter();
    let user = next_account_info(account_iter)?;
    let user_profile = next_account_info(account_iter)?;
    let target_profile = next_account_info(account_iter)?;

    check_signer(user)?;
    let mut profile = load_owned_profile(program_id, user_profile, user.key)?;
    if target.eq(user.key) {
        return Err(ProfileError::SelfFollow.into());
    }

    let (target_pda, _) = UserProfile::derive(&target, program_id);
    if target_pda.ne(target_profile.key) {
        log("invalid target profile pda");
        return Err(ProfileError::InvalidPda.into());
    }
    if !is_allocated(program_id, target_profile) {
        log(&format!("{} has no profile", target));
        return Err(ProfileError::TargetNotFound.into());
    }

    if profile.follow(target)? {
        profile.pack(&mut user_profile.data.borrow_mut())?;
        log(&format!("{} followed {}", user.key, target));
    } else {
        log(&format!("{} already follows {}", user.key, target));
    }
    Ok(())
}

/// handler removing a user from the signer's following list
///
/// accounts
///     0 [signer]    - user
///     1 [writeable] - user_profile
pub fn handle_unfollow_user(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    ix: ProfileIx,
) -> Result<(), ProgramError> {
    let ProfileIx::UnfollowUser { target } = ix else {
        return Err(ProgramError::InvalidArgument);
    };
    let account_iter = &mut accounts.iter();
    let user = next_account_info(account_iter)?;
    let user_profile = next_account_info(account_iter)?;

    check_signer(user)?;
    let mut profile = load_owned_profile(program_id, user_profile, user.key)?;
    profile.unfollow(&target)?;
    profile.pack(&mut user_profile.data.borrow_mut())?;

    log(&format!("{} unfollowed {}", user.key, target));
    Ok(())
}
