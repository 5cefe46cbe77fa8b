use solana_program::{
    account_info::{next_account_info, AccountInfo},
    instruction::{AccountMeta, Instruction},
    log::sol_log as log,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
};

use super::ProfileIx;
use crate::{
    state::{user_profile::UserProfile, users_list::UsersList},
    utils::{check_signer, close_account, load_owned_profile, load_users_list},
};

pub struct DeleteProfileAccountMeta {
    pub user: Pubkey,
    pub user_profile: Pubkey,
    pub users_list: Pubkey,
}

impl DeleteProfileAccountMeta {
    pub fn new(user: Pubkey) -> Self {
        Self {
            user,
            user_profile: UserProfile::derive(&user, &crate::id()).0,
            users_list: UsersList::derive(&crate::id()).0,
        }
    }
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.user_profile, false),
            AccountMeta::new(self.users_list, false),
        ]
    }
}

/// builds the instruction deleting the profile of `user`
pub fn delete_profile(user: Pubkey) -> Result<Instruction, ProgramError> {
    Ok(Instruction::new_with_bytes(
        crate::id(),
        &ProfileIx::DeleteProfile.pack()?,
        DeleteProfileAccountMeta::new(user).to_account_metas(),
    ))
}

/// handler closing the signer's profile and unregistering the signer
///
/// accounts
///     0 [writeable, signer] - user, receives the profile rent
///     1 [writeable]         - user_profile
///     2 [writeable]         - users_list
pub fn handle_delete_profile(program_id: &Pubkey, accounts: &[AccountInfo]) -> Result<(), ProgramError> {
    let account_iter = &mut accounts.iter();
    let user = next_account_info(account_iter)?;
    let user_profile = next_account_info(account_iter)?;
    let users_list_info = next_account_info(account_iter)?;

    check_signer(user)?;
    let profile = load_owned_profile(program_id, user_profile, user.key)?;
    let mut users_list = load_users_list(program_id, users_list_info)?;
    users_list.unregister(&profile.owner)?;

    UsersList::pack(users_list, &mut users_list_info.data.borrow_mut())?;
    close_account(user_profile, user)?;

    log(&format!("deleted profile {} of {}", user_profile.key, user.key));
    Ok(())
}
