use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        user::{NewUser, PasswordHash, Username},
    },
};

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
}

impl UserCommandService {
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::validation("username already exists"));
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let new_user = NewUser::new(username, password_hash, self.clock.now());

        let user = self.user_repo.insert(new_user).await.map_err(|err| match err {
            DomainError::Conflict(msg) => ApplicationError::validation(msg),
            other => ApplicationError::from(other),
        })?;

        Ok(user.into())
    }
}
