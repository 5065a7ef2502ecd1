//! User account registration and profile updates

use json::Value;
use serde::Deserialize;

use crate::{
  entity::user::{self, Model},
  prelude::*,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub name: String,
  pub email: String,
  pub timezone: Option<String>,
  pub tracked_activities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
  pub name: Option<String>,
  pub timezone: Option<String>,
  pub notifications_enabled: Option<bool>,
  pub weekly_email_enabled: Option<bool>,
  pub tracked_activities: Option<Vec<String>>,
}

pub struct User<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> User<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn register(&self, new: NewUser) -> Result<Model> {
    if self.by_email(&new.email).await?.is_some() {
      return Err(Error::EmailTaken);
    }

    let user = user::ActiveModel {
      name: Set(new.name),
      email: Set(new.email),
      timezone: Set(new.timezone),
      notifications_enabled: Set(true),
      weekly_email_enabled: Set(false),
      tracked_activities: Set(new.tracked_activities.map(tracked_json)),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    Ok(user.insert(self.db).await?)
  }

  pub async fn by_id(&self, id: i64) -> Result<Option<Model>> {
    let user = user::Entity::find_by_id(id).one(self.db).await?;
    Ok(user)
  }

  pub async fn by_email(&self, email: &str) -> Result<Option<Model>> {
    let user = user::Entity::find()
      .filter(user::Column::Email.eq(email))
      .one(self.db)
      .await?;
    Ok(user)
  }

  pub async fn update_profile(
    &self,
    user: Model,
    update: ProfileUpdate,
  ) -> Result<Model> {
    let mut active: user::ActiveModel = user.into();

    if let Some(name) = update.name {
      active.name = Set(name);
    }
    if let Some(timezone) = update.timezone {
      active.timezone = Set(Some(timezone));
    }
    if let Some(enabled) = update.notifications_enabled {
      active.notifications_enabled = Set(enabled);
    }
    if let Some(enabled) = update.weekly_email_enabled {
      active.weekly_email_enabled = Set(enabled);
    }
    if let Some(tracked) = update.tracked_activities {
      active.tracked_activities = Set(Some(tracked_json(tracked)));
    }

    Ok(active.update(self.db).await?)
  }
}

fn tracked_json(keys: Vec<String>) -> Value {
  Value::Array(keys.into_iter().map(Value::String).collect())
}
