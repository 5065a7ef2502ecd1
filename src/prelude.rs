pub use std::collections::{BTreeMap, HashMap, HashSet};

pub use chrono::{
  Datelike, NaiveDate as Date, NaiveDateTime as DateTime, TimeDelta, TimeZone,
  Utc,
};
pub use chrono_tz::Tz;
pub use sea_orm::{
  ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, Database,
  DatabaseConnection, EntityTrait, Iterable, QueryFilter, QueryOrder,
  QuerySelect, Set, TransactionTrait,
};
pub use sea_orm_migration::MigratorTrait;
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
