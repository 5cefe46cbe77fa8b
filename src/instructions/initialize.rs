use solana_program::{
    account_info::{next_account_info, AccountInfo},
    instruction::{AccountMeta, Instruction},
    log::sol_log as log,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    system_program,
};

use super::ProfileIx;
use crate::{
    error::ProfileError,
    state::users_list::UsersList,
    utils::{check_signer, check_system_program, create_pda_account},
};

pub struct InitializeAccountMeta {
    pub payer: Pubkey,
    pub users_list: Pubkey,
    pub system_program: Pubkey,
}

impl InitializeAccountMeta {
    pub fn new(payer: Pubkey) -> Self {
        Self {
            payer,
            users_list: UsersList::derive(&crate::id()).0,
            system_program: system_program::id(),
        }
    }
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.payer, true),
            AccountMeta::new(self.users_list, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

/// builds the instruction allocating the users list, funded by `payer`
pub fn initialize(payer: Pubkey) -> Result<Instruction, ProgramError> {
    Ok(Instruction::new_with_bytes(
        crate::id(),
        &ProfileIx::Initialize.pack()?,
        InitializeAccountMeta::new(payer).to_account_metas(),
    ))
}

/// handler allocating the users list
///
/// accounts
///     0 [writeable, signer] - payer
///     1 [writeable]         - users_list
///     2 []                  - system_program
pub fn handle_initialize(program_id: &Pubkey, accounts: &[AccountInfo]) -> Result<(), ProgramError> {
    let account_iter = &mut accounts.iter();
    let payer = next_account_info(account_iter)?;
    let users_list = next_account_info(account_iter)?;
    let system_program = next_account_info(account_iter)?;

    check_signer(payer)?;
    check_system_program(system_program)?;

    let (pda, bump) = UsersList::derive(program_id);
    if pda.ne(users_list.key) {
        log("invalid users list pda");
        return Err(ProfileError::InvalidPda.into());
    }
    if users_list.owner.eq(program_id) || !users_list.data_is_empty() {
        return Err(ProfileError::AlreadyInitialized.into());
    }

    create_pda_account(
        payer,
        users_list,
        system_program,
        program_id,
        UsersList::size(),
        &[UsersList::seed(), program_id.as_ref(), &[bump]],
    )?;

    UsersList::pack(
        UsersList {
            is_initialized: true,
            bump,
            users: Vec::new(),
        },
        &mut users_list.data.borrow_mut(),
    )?;
    log(&format!("initialized users list {}", users_list.key));
    Ok(())
}
