use super::UserRole;
use crate::domain::PhotoRef;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
    pub photo: Option<PhotoRef>,
}
