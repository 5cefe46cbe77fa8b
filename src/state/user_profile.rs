use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    program_error::ProgramError,
    pubkey::{Pubkey, PUBKEY_BYTES},
};

use crate::error::ProfileError;

pub const MAX_NICKNAME_LEN: usize = 32;
pub const MAX_DESCRIPTION_LEN: usize = 256;
pub const MAX_TWITTER_LEN: usize = 64;
pub const MAX_WEBSITE_LEN: usize = 64;
pub const MAX_EMAIL_LEN: usize = 64;
/// ipfs hashes fit comfortably in 64 bytes
pub const MAX_PIC_LEN: usize = 64;
pub const MAX_AVATAR_LEN: usize = 64;
/// maximum number of users a single profile can follow
pub const MAX_FOLLOWING: usize = 32;

/// borsh prefixes strings and vectors with a u32 length
const LEN_PREFIX: usize = 4;

/// per user profile, stored at the pda derived from the owner's key
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UserProfile {
    /// wallet which created, and is the only one allowed to mutate, this profile
    pub owner: Pubkey,
    pub nickname: String,
    pub description: String,
    pub twitter_link: String,
    pub website_link: String,
    pub email: String,
    /// unix timestamp of profile creation
    pub registration_time: i64,
    /// users followed by the owner, in the order they were followed
    pub following: Vec<Pubkey>,
    /// ipfs hash of the profile picture
    pub pic: String,
    /// ipfs hash of the avatar
    pub avatar: String,
    /// bump used to derive the profile pda
    pub bump: u8,
}

/// profile contents supplied when creating a profile
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NewProfile {
    pub nickname: String,
    pub description: String,
    pub twitter_link: String,
    pub website_link: String,
    pub email: String,
    pub pic: Option<String>,
    pub avatar: Option<String>,
}

/// partial profile update, `None` fields are left untouched
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProfileUpdate {
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub twitter_link: Option<String>,
    pub website_link: Option<String>,
    pub email: Option<String>,
    pub pic: Option<String>,
    pub avatar: Option<String>,
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ProfileError> {
    if value.len() > max {
        return Err(ProfileError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

fn check_opt_len(field: &'static str, value: &Option<String>, max: usize) -> Result<(), ProfileError> {
    match value {
        Some(value) => check_len(field, value, max),
        None => Ok(()),
    }
}

impl NewProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_len("nickname", &self.nickname, MAX_NICKNAME_LEN)?;
        check_len("description", &self.description, MAX_DESCRIPTION_LEN)?;
        check_len("twitter_link", &self.twitter_link, MAX_TWITTER_LEN)?;
        check_len("website_link", &self.website_link, MAX_WEBSITE_LEN)?;
        check_len("email", &self.email, MAX_EMAIL_LEN)?;
        check_opt_len("pic", &self.pic, MAX_PIC_LEN)?;
        check_opt_len("avatar", &self.avatar, MAX_AVATAR_LEN)
    }
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_opt_len("nickname", &self.nickname, MAX_NICKNAME_LEN)?;
        check_opt_len("description", &self.description, MAX_DESCRIPTION_LEN)?;
        check_opt_len("twitter_link", &self.twitter_link, MAX_TWITTER_LEN)?;
        check_opt_len("website_link", &self.website_link, MAX_WEBSITE_LEN)?;
        check_opt_len("email", &self.email, MAX_EMAIL_LEN)?;
        check_opt_len("pic", &self.pic, MAX_PIC_LEN)?;
        check_opt_len("avatar", &self.avatar, MAX_AVATAR_LEN)
    }
}

impl UserProfile {
    /// fixed allocation size of a profile account, every string and the following list
    /// are budgeted at their maximum length
    pub const fn size() -> usize {
        PUBKEY_BYTES // owner
            + LEN_PREFIX + MAX_NICKNAME_LEN
            + LEN_PREFIX + MAX_DESCRIPTION_LEN
            + LEN_PREFIX + MAX_TWITTER_LEN
            + LEN_PREFIX + MAX_WEBSITE_LEN
            + LEN_PREFIX + MAX_EMAIL_LEN
            + 8 // registration_time
            + LEN_PREFIX + PUBKEY_BYTES * MAX_FOLLOWING
            + LEN_PREFIX + MAX_PIC_LEN
            + LEN_PREFIX + MAX_AVATAR_LEN
            + 1 // bump
    }
    pub const fn seed() -> &'static [u8] {
        b"user_profile"
    }
    pub fn derive(owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::seed(), owner.as_ref()], program_id)
    }
    /// recreates the profile address of `owner` with a known bump
    pub fn create_pda(owner: &Pubkey, bump: u8, program_id: &Pubkey) -> Result<Pubkey, ProgramError> {
        Pubkey::create_program_address(&[Self::seed(), owner.as_ref(), &[bump]], program_id)
            .map_err(|_| ProfileError::InvalidPda.into())
    }
    /// similar to create_pda except it uses data stored in the account
    pub fn parse_pda(&self, program_id: &Pubkey) -> Result<Pubkey, ProgramError> {
        Self::create_pda(&self.owner, self.bump, program_id)
    }
    pub fn new(owner: Pubkey, fields: NewProfile, registration_time: i64, bump: u8) -> Self {
        Self {
            owner,
            nickname: fields.nickname,
            description: fields.description,
            twitter_link: fields.twitter_link,
            website_link: fields.website_link,
            email: fields.email,
            registration_time,
            following: Vec::new(),
            pic: fields.pic.unwrap_or_default(),
            avatar: fields.avatar.unwrap_or_default(),
            bump,
        }
    }
    /// overwrites every supplied field. owner, following and registration_time are never touched
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            nickname,
            description,
            twitter_link,
            website_link,
            email,
            pic,
            avatar,
        } = update;
        let targets = [
            (nickname, &mut self.nickname),
            (description, &mut self.description),
            (twitter_link, &mut self.twitter_link),
            (website_link, &mut self.website_link),
            (email, &mut self.email),
            (pic, &mut self.pic),
            (avatar, &mut self.avatar),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
    /// adds target to the following list, returning false if it was already followed
    pub fn follow(&mut self, target: Pubkey) -> Result<bool, ProfileError> {
        if target.eq(&self.owner) {
            return Err(ProfileError::SelfFollow);
        }
        if self.following.contains(&target) {
            return Ok(false);
        }
        if self.following.len() >= MAX_FOLLOWING {
            return Err(ProfileError::FollowingListFull);
        }
        self.following.push(target);
        Ok(true)
    }
    pub fn unfollow(&mut self, target: &Pubkey) -> Result<(), ProfileError> {
        let pos = self
            .following
            .iter()
            .position(|f| f.eq(target))
            .ok_or(ProfileError::NotFollowing)?;
        self.following.remove(pos);
        Ok(())
    }
    /// reads a profile from account data, ignoring the unused tail of the allocation
    pub fn unpack(src: &[u8]) -> Result<Self, ProgramError> {
        Self::deserialize(&mut &src[..]).map_err(|_| ProgramError::InvalidAccountData)
    }
    /// writes the profile into account data, zeroing the unused tail of the allocation
    pub fn pack(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        let buf = self
            .try_to_vec()
            .map_err(|e| ProgramError::BorshIoError(e.to_string()))?;
        if buf.len() > dst.len() {
            return Err(ProgramError::AccountDataTooSmall);
        }
        let (head, tail) = dst.split_at_mut(buf.len());
        head.copy_from_slice(&buf);
        tail.fill(0);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn new_profile() -> NewProfile {
        NewProfile {
            nickname: "TestUser".to_string(),
            description: "This is a test user".to_string(),
            twitter_link: "https://twitter.com/test".to_string(),
            website_link: "https://test.com".to_string(),
            email: "test@test.com".to_string(),
            pic: None,
            avatar: None,
        }
    }

    fn max_profile() -> UserProfile {
        let fill = |n: usize| "x".repeat(n);
        UserProfile {
            owner: Pubkey::new_unique(),
            nickname: fill(MAX_NICKNAME_LEN),
            description: fill(MAX_DESCRIPTION_LEN),
            twitter_link: fill(MAX_TWITTER_LEN),
            website_link: fill(MAX_WEBSITE_LEN),
            email: fill(MAX_EMAIL_LEN),
            registration_time: i64::MAX,
            following: (0..MAX_FOLLOWING).map(|_| Pubkey::new_unique()).collect(),
            pic: fill(MAX_PIC_LEN),
            avatar: fill(MAX_AVATAR_LEN),
            bump: 255,
        }
    }

    #[test]
    fn test_size_fits_max_profile() {
        let profile = max_profile();
        assert_eq!(profile.try_to_vec().unwrap().len(), UserProfile::size());
        let mut buf = vec![0_u8; UserProfile::size()];
        profile.pack(&mut buf).unwrap();
        assert_eq!(UserProfile::unpack(&buf).unwrap(), profile);
    }

    #[test]
    fn test_pack_clears_stale_tail() {
        let mut buf = vec![0_u8; UserProfile::size()];
        max_profile().pack(&mut buf).unwrap();

        let small = UserProfile::new(Pubkey::new_unique(), new_profile(), 1, 254);
        small.pack(&mut buf).unwrap();
        let used = small.try_to_vec().unwrap().len();
        assert!(buf[used..].iter().all(|b| *b == 0));
        assert_eq!(UserProfile::unpack(&buf).unwrap(), small);
    }

    #[test]
    fn test_new_defaults_optional_fields() {
        let owner = Pubkey::new_unique();
        let profile = UserProfile::new(owner, new_profile(), 1_700_000_000, 250);
        assert_eq!(profile.owner, owner);
        assert_eq!(profile.nickname, "TestUser");
        assert_eq!(profile.pic, "");
        assert_eq!(profile.avatar, "");
        assert!(profile.following.is_empty());
        assert_eq!(profile.registration_time, 1_700_000_000);
    }

    #[test]
    fn test_apply_update_partial() {
        let mut profile = UserProfile::new(Pubkey::new_unique(), new_profile(), 7, 250);
        let followed = Pubkey::new_unique();
        profile.follow(followed).unwrap();
        let before = profile.clone();

        profile.apply_update(ProfileUpdate {
            nickname: Some("Renamed".to_string()),
            avatar: Some("QmAvatar".to_string()),
            ..Default::default()
        });

        assert_eq!(profile.nickname, "Renamed");
        assert_eq!(profile.avatar, "QmAvatar");
        assert_eq!(profile.description, before.description);
        assert_eq!(profile.email, before.email);
        assert_eq!(profile.following, vec![followed]);
        assert_eq!(profile.owner, before.owner);
        assert_eq!(profile.registration_time, 7);
    }

    #[test]
    fn test_follow_rules() {
        let owner = Pubkey::new_unique();
        let mut profile = UserProfile::new(owner, new_profile(), 0, 0);
        assert_eq!(profile.follow(owner), Err(ProfileError::SelfFollow));

        let target = Pubkey::new_unique();
        assert_eq!(profile.follow(target), Ok(true));
        assert_eq!(profile.follow(target), Ok(false));
        assert_eq!(profile.following, vec![target]);

        for _ in 1..MAX_FOLLOWING {
            profile.follow(Pubkey::new_unique()).unwrap();
        }
        assert_eq!(
            profile.follow(Pubkey::new_unique()),
            Err(ProfileError::FollowingListFull)
        );
        // re-following an existing entry is still a no-op when full
        assert_eq!(profile.follow(target), Ok(false));
    }

    #[test]
    fn test_unfollow() {
        let mut profile = UserProfile::new(Pubkey::new_unique(), new_profile(), 0, 0);
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        profile.follow(a).unwrap();
        profile.follow(b).unwrap();
        profile.unfollow(&a).unwrap();
        assert_eq!(profile.following, vec![b]);
        assert_eq!(profile.unfollow(&a), Err(ProfileError::NotFollowing));
    }

    #[test]
    fn test_validate_budgets() {
        assert!(new_profile().validate().is_ok());
        let mut fields = new_profile();
        fields.nickname = "n".repeat(MAX_NICKNAME_LEN + 1);
        assert_eq!(
            fields.validate(),
            Err(ProfileError::FieldTooLong {
                field: "nickname",
                len: MAX_NICKNAME_LEN + 1,
                max: MAX_NICKNAME_LEN
            })
        );
        let update = ProfileUpdate {
            pic: Some("p".repeat(MAX_PIC_LEN + 1)),
            ..Default::default()
        };
        assert!(matches!(
            update.validate(),
            Err(ProfileError::FieldTooLong { field: "pic", .. })
        ));
        // the byte budget counts utf-8 bytes, not characters
        let fields = NewProfile {
            nickname: "é".repeat(MAX_NICKNAME_LEN / 2 + 1),
            ..new_profile()
        };
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_derive() {
        let owner = Pubkey::new_unique();
        let (pda, bump) = UserProfile::derive(&owner, &crate::id());
        assert_eq!(pda, UserProfile::create_pda(&owner, bump, &crate::id()).unwrap());
        assert_ne!(pda, UserProfile::derive(&Pubkey::new_unique(), &crate::id()).0);
        let profile = UserProfile::new(owner, new_profile(), 0, bump);
        assert_eq!(profile.parse_pda(&crate::id()).unwrap(), pda);
    }
}
