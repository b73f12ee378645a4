use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    model::{checkin::CheckinDto, geocache::GeocacheDto, image::ImageDto},
    server::service::user::AccountExport,
};

/// Email and password submitted to register or log in
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChangePasswordDto {
    pub old_password: String,
    pub new_password: String,
}

/// Password confirmation required to delete an account
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteAccountDto {
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: NaiveDateTime,
}

/// Every row stored for the account
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AccountExportDto {
    pub user: UserDto,
    pub geocaches: Vec<GeocacheDto>,
    pub checkins: Vec<CheckinDto>,
    pub images: Vec<ImageDto>,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            roles: user
                .roles
                .split(',')
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(str::to_string)
                .collect(),
            created_at: user.created_at,
        }
    }
}

impl From<AccountExport> for AccountExportDto {
    fn from(export: AccountExport) -> Self {
        Self {
            user: export.user.into(),
            geocaches: export.geocaches.into_iter().map(Into::into).collect(),
            checkins: export.checkins.into_iter().map(Into::into).collect(),
            images: export.images.into_iter().map(Into::into).collect(),
        }
    }
}
