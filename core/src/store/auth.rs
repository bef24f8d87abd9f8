use serde::Serialize;

use crate::action::Action;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStore {
    pub is_logged_in: bool,
}

impl AuthStore {
    pub fn set_logged_in(&mut self, value: bool) {
        self.is_logged_in = value;
    }

    pub fn reduce(&mut self, action: &Action) {
        if let Action::SetIsLoggedIn(value) = action {
            self.set_logged_in(*value);
        }
    }
}
