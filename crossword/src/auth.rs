use log::{debug, info};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::config::{Credentials, ExtractorKind};
use crate::error::AuthError;

pub const TOKEN_PATTERN: &str = r#"input.*token.*value="([a-zA-Z0-9]+?)""#;
pub const EXPIRES_PATTERN: &str = r#"input.*expires.*value="([0-9]+?)""#;

/// Hidden form values the login endpoint expects back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFields {
    pub token: String,
    pub expires: Option<String>,
}

pub trait LoginFieldExtractor {
    fn extract_login_fields(&self, html: &str) -> Result<LoginFields, AuthError>;
}

/// Scans the login page line by line. A later matching line replaces an
/// earlier one; scanning stops once both fields have been seen.
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    token: Regex,
    expires: Regex,
    require_expires: bool,
}

impl RegexExtractor {
    pub fn new() -> RegexExtractor {
        RegexExtractor {
            token: Regex::new(TOKEN_PATTERN).unwrap(),
            expires: Regex::new(EXPIRES_PATTERN).unwrap(),
            require_expires: true,
        }
    }

    pub fn require_expires(mut self, require: bool) -> RegexExtractor {
        self.require_expires = require;
        self
    }
}

impl Default for RegexExtractor {
    fn default() -> Self {
        RegexExtractor::new()
    }
}

impl LoginFieldExtractor for RegexExtractor {
    fn extract_login_fields(&self, html: &str) -> Result<LoginFields, AuthError> {
        let mut token = None;
        let mut expires = None;

        for line in html.lines() {
            if let Some(caps) = self.token.captures(line) {
                token = Some(caps[1].to_string());
            }
            if let Some(caps) = self.expires.captures(line) {
                expires = Some(caps[1].to_string());
            }
            if token.is_some() && expires.is_some() {
                break;
            }
        }

        finish(token, expires, self.require_expires)
    }
}

/// Reads `<input name="token">` and `<input name="expires">` from the parsed page
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    require_expires: bool,
}

impl HtmlExtractor {
    pub fn new() -> HtmlExtractor {
        HtmlExtractor {
            require_expires: true,
        }
    }

    pub fn require_expires(mut self, require: bool) -> HtmlExtractor {
        self.require_expires = require;
        self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        HtmlExtractor::new()
    }
}

impl LoginFieldExtractor for HtmlExtractor {
    fn extract_login_fields(&self, html: &str) -> Result<LoginFields, AuthError> {
        let document = Html::parse_document(html);
        let token_selector = Selector::parse(r#"input[name="token"]"#).unwrap();
        let expires_selector = Selector::parse(r#"input[name="expires"]"#).unwrap();

        let input_value = |selector: &Selector| {
            document
                .select(selector)
                .filter_map(|input| input.value().attr("value"))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let token = input_value(&token_selector);
        let expires = input_value(&expires_selector);
        finish(token, expires, self.require_expires)
    }
}

fn finish(
    token: Option<String>,
    expires: Option<String>,
    require_expires: bool,
) -> Result<LoginFields, AuthError> {
    let token = token.ok_or(AuthError::MissingField("token"))?;
    if require_expires && expires.is_none() {
        return Err(AuthError::MissingField("expires"));
    }
    Ok(LoginFields { token, expires })
}

pub fn extractor_for(kind: ExtractorKind) -> Box<dyn LoginFieldExtractor> {
    match kind {
        ExtractorKind::Regex => Box::new(RegexExtractor::new()),
        ExtractorKind::Html => Box::new(HtmlExtractor::new()),
    }
}

/// The form posted to the login endpoint
pub fn login_form(fields: &LoginFields, credentials: &Credentials) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("token", fields.token.clone()),
        ("userid", credentials.user.clone()),
        ("password", credentials.pass.clone()),
        ("remember", "true".to_string()),
        ("is_continue", "false".to_string()),
    ];
    if let Some(expires) = &fields.expires {
        form.push(("expires", expires.clone()));
    }
    form
}

/// A logged-in cookie jar. Built fresh for every run and dropped with it.
#[derive(Debug)]
pub struct Session {
    client: Client,
}

impl Session {
    /// An empty, not yet logged-in jar
    pub fn new() -> Result<Session, reqwest::Error> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Session { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

pub struct Authenticator<'a> {
    login_url: &'a str,
    extractor: &'a dyn LoginFieldExtractor,
}

impl<'a> Authenticator<'a> {
    pub fn new(login_url: &'a str, extractor: &'a dyn LoginFieldExtractor) -> Authenticator<'a> {
        Authenticator {
            login_url,
            extractor,
        }
    }

    /// Log in and return the authenticated session.
    ///
    /// The response to the credential POST is not checked; a bad login shows
    /// up as a failed fetch.
    pub fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = Session::new()?;
        let client = session.client();

        info!("Getting login page");
        let body = client.get(self.login_url).send()?.text()?;

        let fields = self.extractor.extract_login_fields(&body)?;
        debug!("Got token: {}", fields.token);
        if let Some(expires) = &fields.expires {
            debug!("Got expires: {}", expires);
        }

        info!("Sending login credentials");
        let response = client
            .post(self.login_url)
            .form(&login_form(&fields, credentials))
            .send()?;
        debug!("Login response status: {}", response.status());

        Ok(session)
    }
}
