use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    log::sol_log as log,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};

use crate::{
    error::ProfileError,
    state::{user_profile::UserProfile, users_list::UsersList},
};

/// returns an error unless the account signed the transaction
pub fn check_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        log(&format!("{} must sign", account.key));
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

pub fn check_system_program(account: &AccountInfo) -> ProgramResult {
    if account.key.ne(&system_program::id()) {
        log(&format!("invalid system program {}", account.key));
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// an account holds program state once it has been allocated and assigned to the program
pub fn is_allocated(program_id: &Pubkey, account: &AccountInfo) -> bool {
    account.owner.eq(program_id) && !account.data_is_empty()
}

/// allocates a rent exempt, program owned account at a pda, with the payer funding it.
///
/// anyone can transfer lamports to a pda before it is allocated, which makes
/// `create_account` fail, so a pre-funded address is topped up to the rent
/// minimum and then allocated and assigned in place
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    program_id: &Pubkey,
    space: usize,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let rent = Rent::get()?;
    let lamports = rent.minimum_balance(space);
    let current_lamports = new_account.lamports();
    if current_lamports == 0 {
        return invoke_signed(
            &system_instruction::create_account(
                payer.key,
                new_account.key,
                lamports,
                space as u64,
                program_id,
            ),
            &[payer.clone(), new_account.clone(), system_program.clone()],
            &[signer_seeds],
        );
    }

    log(&format!(
        "{} already holds {} lamports",
        new_account.key, current_lamports
    ));
    let top_up = lamports.saturating_sub(current_lamports);
    if top_up > 0 {
        invoke(
            &system_instruction::transfer(payer.key, new_account.key, top_up),
            &[payer.clone(), new_account.clone(), system_program.clone()],
        )?;
    }
    invoke_signed(
        &system_instruction::allocate(new_account.key, space as u64),
        &[new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )?;
    invoke_signed(
        &system_instruction::assign(new_account.key, program_id),
        &[new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )
}

/// returns every lamport held by `account` to `destination`, then hands the emptied
/// account back to the system program so the address can be allocated again
pub fn close_account(account: &AccountInfo, destination: &AccountInfo) -> ProgramResult {
    let lamports = account.lamports();
    **destination.lamports.borrow_mut() = destination
        .lamports()
        .checked_add(lamports)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    **account.lamports.borrow_mut() = 0;
    account.data.borrow_mut().fill(0);
    account.realloc(0, false)?;
    account.assign(&system_program::id());
    Ok(())
}

/// loads the users list, ensuring it is the initialized singleton of this program
pub fn load_users_list(program_id: &Pubkey, account: &AccountInfo) -> Result<UsersList, ProgramError> {
    if !is_allocated(program_id, account) {
        log(&format!("users list {} is not initialized", account.key));
        return Err(ProfileError::RegistryNotInitialized.into());
    }
    let users_list = UsersList::unpack(&account.data.borrow())?;
    if UsersList::create_pda(program_id, users_list.bump)?.ne(account.key) {
        log("invalid users list pda");
        return Err(ProfileError::InvalidPda.into());
    }
    Ok(users_list)
}

/// loads the profile held by `account`, ensuring it sits at the address derived from
/// its stored owner
pub fn load_profile(program_id: &Pubkey, account: &AccountInfo) -> Result<UserProfile, ProgramError> {
    if !is_allocated(program_id, account) {
        log(&format!("no profile at {}", account.key));
        return Err(ProfileError::NotFound.into());
    }
    let profile = UserProfile::unpack(&account.data.borrow())?;
    if profile.parse_pda(program_id)?.ne(account.key) {
        log("invalid pda");
        return Err(ProfileError::InvalidPda.into());
    }
    Ok(profile)
}

/// loads the profile at `account` and verifies `signer` owns it
pub fn load_owned_profile(
    program_id: &Pubkey,
    account: &AccountInfo,
    signer: &Pubkey,
) -> Result<UserProfile, ProgramError> {
    let profile = load_profile(program_id, account)?;
    if profile.owner.ne(signer) {
        log(&format!(
            "signer {} does not own profile of {}",
            signer, profile.owner
        ));
        return Err(ProfileError::Unauthorized.into());
    }
    Ok(profile)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::state::user_profile::NewProfile;

    fn account<'a>(
        key: &'a Pubkey,
        owner: &'a Pubkey,
        lamports: &'a mut u64,
        data: &'a mut [u8],
    ) -> AccountInfo<'a> {
        AccountInfo::new(key, false, true, lamports, data, owner, false, 0)
    }

    fn profile_data(owner: Pubkey) -> (Pubkey, Vec<u8>) {
        let (pda, bump) = UserProfile::derive(&owner, &crate::id());
        let profile = UserProfile::new(owner, NewProfile::default(), 0, bump);
        let mut data = vec![0_u8; UserProfile::size()];
        profile.pack(&mut data).unwrap();
        (pda, data)
    }

    #[test]
    fn test_load_owned_profile() {
        let owner = Pubkey::new_unique();
        let program_id = crate::id();
        let (pda, mut data) = profile_data(owner);
        let mut lamports = 10;
        let info = account(&pda, &program_id, &mut lamports, &mut data);

        assert_eq!(
            load_owned_profile(&program_id, &info, &owner).unwrap().owner,
            owner
        );
        assert_eq!(
            load_owned_profile(&program_id, &info, &Pubkey::new_unique()).unwrap_err(),
            ProgramError::from(ProfileError::Unauthorized)
        );
    }

    #[test]
    fn test_load_profile_not_found() {
        let program_id = crate::id();
        let system = system_program::id();
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![];
        let info = account(&key, &system, &mut lamports, &mut data);
        assert_eq!(
            load_profile(&program_id, &info).unwrap_err(),
            ProgramError::from(ProfileError::NotFound)
        );
    }

    #[test]
    fn test_load_profile_wrong_address() {
        let program_id = crate::id();
        let (_, mut data) = profile_data(Pubkey::new_unique());
        let key = Pubkey::new_unique();
        let mut lamports = 10;
        let info = account(&key, &program_id, &mut lamports, &mut data);
        assert_eq!(
            load_profile(&program_id, &info).unwrap_err(),
            ProgramError::from(ProfileError::InvalidPda)
        );
    }
}
