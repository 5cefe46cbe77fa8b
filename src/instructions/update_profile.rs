use solana_program::{
    account_info::{next_account_info, AccountInfo},
    instruction::{AccountMeta, Instruction},
    log::sol_log as log,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use super::ProfileIx;
use crate::{
    state::user_profile::{ProfileUpdate, UserProfile},
    utils::{check_signer, load_owned_profile},
};

pub struct UpdateProfileAccountMeta {
    pub user: Pubkey,
    pub user_profile: Pubkey,
}

impl UpdateProfileAccountMeta {
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

/// builds the instruction updating the profile of `user`
pub fn update_profile(user: Pubkey, fields: ProfileUpdate) -> Result<Instruction, ProgramError> {
    Ok(Instruction::new_with_bytes(
        crate::id(),
        &ProfileIx::UpdateProfile { fields }.pack()?,
        UpdateProfileAccountMeta::new(user).to_account_metas(),
    ))
}

/// handler overwriting the supplied fields of the signer's profile
///
/// accounts
///     0 [signer]    - user
///     1 [writeable] - user_profile
pub fn handle_update_profile(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    ix: ProfileIx,
) -> Result<(), ProgramError> {
    let ProfileIx::UpdateProfile { fields } = ix else {
        return Err(ProgramError::InvalidArgument);
    };
    let account_iter = &mut accounts.iter();
    let user = next_account_info(account_iter)?;
    let user_profile = next_account_info(account_iter)?;

    check_signer(user)?;
    let mut profile = load_owned_profile(program_id, user_profile, user.key)?;
    fields.validate()?;

    profile.apply_update(fields);
    profile.pack(&mut user_profile.data.borrow_mut())?;

    log(&format!("updated profile {}", user_profile.key));
    Ok(())
}
