mod alert;
mod button;
mod field;
mod spinner;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonVariant};
pub(crate) use field::TextField;
pub(crate) use spinner::{LoadingScreen, Spinner};
