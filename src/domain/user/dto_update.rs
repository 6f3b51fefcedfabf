use crate::domain::PhotoRef;

/// Profile fields to change; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<PhotoRef>,
}
