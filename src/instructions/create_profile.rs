use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    instruction::{AccountMeta, Instruction},
    log::sol_log as log,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    system_program,
    sysvar::Sysvar,
};

use super::ProfileIx;
use crate::{
    error::ProfileError,
    state::{
        user_profile::{NewProfile, UserProfile},
        users_list::UsersList,
    },
    utils::{check_signer, check_system_program, create_pda_account, load_users_list},
};

pub struct CreateProfileAccountMeta {
    pub user: Pubkey,
    pub user_profile: Pubkey,
    pub users_list: Pubkey,
    pub system_program: Pubkey,
}

impl CreateProfileAccountMeta {
    pub fn new(user: Pubkey) -> Self {
        Self {
            user,
            user_profile: UserProfile::derive(&user, &crate::id()).0,
            users_list: UsersList::derive(&crate::id()).0,
            system_program: system_program::id(),
        }
    }
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.user_profile, false),
            AccountMeta::new(self.users_list, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

/// builds the instruction creating the profile of `user`
pub fn create_profile(user: Pubkey, fields: NewProfile) -> Result<Instruction, ProgramError> {
    Ok(Instruction::new_with_bytes(
        crate::id(),
        &ProfileIx::CreateProfile { fields }.pack()?,
        CreateProfileAccountMeta::new(user).to_account_metas(),
    ))
}

/// handler creating the signer's profile and registering the signer
///
/// accounts
///     0 [writeable, signer] - user
///     1 [writeable]         - user_profile
///     2 [writeable]         - users_list
///     3 []                  - system_program
pub fn handle_create_profile(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    ix: ProfileIx,
) -> Result<(), ProgramError> {
    let ProfileIx::CreateProfile { fields } = ix else {
        return Err(ProgramError::InvalidArgument);
    };
    let account_iter = &mut accounts.iter();
    let user = next_account_info(account_iter)?;
    let user_profile = next_account_info(account_iter)?;
    let users_list_info = next_account_info(account_iter)?;
    let system_program = next_account_info(account_iter)?;

    check_signer(user)?;
    check_system_program(system_program)?;

    let (pda, bump) = UserProfile::derive(user.key, program_id);
    if pda.ne(user_profile.key) {
        log("invalid profile pda");
        return Err(ProfileError::InvalidPda.into());
    }
    if user_profile.owner.eq(program_id) || !user_profile.data_is_empty() {
        log(&format!("profile of {} already exists", user.key));
        return Err(ProfileError::AlreadyExists.into());
    }
    fields.validate()?;

    // registration is checked before the profile is allocated
    let mut users_list = load_users_list(program_id, users_list_info)?;
    users_list.register(*user.key)?;

    create_pda_account(
        user,
        user_profile,
        system_program,
        program_id,
        UserProfile::size(),
        &[UserProfile::seed(), user.key.as_ref(), &[bump]],
    )?;

    let clock = Clock::get()?;
    let profile = UserProfile::new(*user.key, fields, clock.unix_timestamp, bump);
    profile.pack(&mut user_profile.data.borrow_mut())?;
    UsersList::pack(users_list, &mut users_list_info.data.borrow_mut())?;

    log(&format!("created profile {} for {}", user_profile.key, user.key));
    Ok(())
}
