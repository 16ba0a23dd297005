use shared::{SessionResponse, User as SharedUser};

use crate::domain::models::user::User as DomainUser;

pub struct UserMapper;

impl UserMapper {
    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            id: domain.id,
            display_name: domain.display_name,
            email: domain.email,
            role: domain.role,
        }
    }

    pub fn to_session_response(user: Option<DomainUser>) -> SessionResponse {
        SessionResponse {
            user: user.map(Self::to_dto),
        }
    }
}
