/// per user profile accounts
pub mod user_profile;
/// singleton registry of users with a profile
pub mod users_list;
