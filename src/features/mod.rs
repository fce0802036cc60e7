//! Domain features (auth and form validation). Routes import these modules so
//! view code stays focused on layout while session and access rules live here.

pub mod auth;
pub mod forms;
