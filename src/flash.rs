use axum_extra::extract::cookie::{Cookie, CookieJar};

const FLASH_COOKIE: &str = "flash";

/// A one-shot notice carried across a single redirect.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }
}

pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    let value = match &flash {
        Flash::Success(m) => format!("success:{}", urlencoding::encode(m)),
        Flash::Error(m) => format!("error:{}", urlencoding::encode(m)),
    };
    jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").http_only(true).build())
}

/// Reads and clears the pending notice, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = cookie.value().split_once(':').map(|(kind, raw)| {
        let message =
            urlencoding::decode(raw).map(|m| m.into_owned()).unwrap_or_default();
        match kind {
            "error" => Flash::Error(message),
            _ => Flash::Success(message),
        }
    });

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, flash)
}
