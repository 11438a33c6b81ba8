//! Cookie construction and lookup.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum_extra::extract::cookie::Cookie;
use fixture_core::SessionId;
use fixture_settings::CookieSettings;

/// Names and attributes of the cookies the fixture issues.
#[derive(Clone, Debug)]
pub struct CookiePolicy {
    session_name: String,
    preference_name: String,
    preference_value: String,
    path: String,
}

impl CookiePolicy {
    /// Build a policy from validated settings.
    pub fn from_settings(settings: &CookieSettings) -> Self {
        Self {
            session_name: settings.session_cookie.clone(),
            preference_name: settings.preference_cookie.clone(),
            preference_value: settings.preference_value.clone(),
            path: settings.path.clone(),
        }
    }

    /// Cookie carrying a freshly issued session identifier.
    pub fn session_cookie(&self, id: &SessionId) -> Cookie<'static> {
        self.build(self.session_name.clone(), id.as_str().to_owned())
    }

    /// The preference cookie set alongside every successful login.
    pub fn preference_cookie(&self) -> Cookie<'static> {
        self.build(self.preference_name.clone(), self.preference_value.clone())
    }

    /// Cookie instructing the client to discard its session cookie.
    ///
    /// Empty value, `Max-Age=0` and an `Expires` in the past.
    pub fn session_removal(&self) -> Cookie<'static> {
        let mut cookie = self.build(self.session_name.clone(), String::new());
        cookie.make_removal();
        cookie
    }

    /// Session identifier presented by the client, if any.
    ///
    /// When the name repeats, the first pair across all `Cookie` headers
    /// wins. An empty value counts as absent.
    pub fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == self.session_name)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn build(&self, name: String, value: String) -> Cookie<'static> {
        Cookie::build((name, value)).path(self.path.clone()).build()
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::from_settings(&CookieSettings::default())
    }
}
