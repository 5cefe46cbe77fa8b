use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, log::sol_log as log,
    program_error::ProgramError, pubkey::Pubkey,
};

use crate::instructions::{
    create_profile::handle_create_profile,
    delete_profile::handle_delete_profile,
    follow_user::{handle_follow_user, handle_unfollow_user},
    initialize::handle_initialize,
    update_profile::handle_update_profile,
    ProfileIx,
};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if program_id.ne(&crate::id()) {
        log(&format!("invalid program_id {:?}", program_id));
        return Err(ProgramError::IncorrectProgramId);
    }
    let profile_ix = ProfileIx::unpack(instruction_data)?;
    match profile_ix {
        ProfileIx::Initialize => {
            handle_initialize(program_id, accounts)?;
        }
        ProfileIx::CreateProfile { .. } => {
            handle_create_profile(program_id, accounts, profile_ix)?;
        }
        ProfileIx::UpdateProfile { .. } => {
            handle_update_profile(program_id, accounts, profile_ix)?;
        }
        ProfileIx::DeleteProfile => {
            handle_delete_profile(program_id, accounts)?;
        }
        ProfileIx::FollowUser { .. } => {
            handle_follow_user(program_id, accounts, profile_ix)?;
        }
        ProfileIx::UnfollowUser { .. } => {
            handle_unfollow_user(program_id, accounts, profile_ix)?;
        }
    }
    Ok(())
}
