//! Best-effort browser/OS detection from a `User-Agent` header.
//!
//! Rules are checked in order; the first match wins. Several browsers embed
//! the tokens of the engine they are built on (Edge and Opera both carry
//! `Chrome/`, Chrome carries `Safari/`), so the more specific rules come first.

use regex::Regex;
use std::sync::OnceLock;

/// Browser and OS names extracted from a user agent. Either may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub browser: Option<String>,
    pub os: Option<String>,
}

impl UserAgentInfo {
    /// Human-readable label of the form `"<browser> on <os>"`.
    #[must_use]
    pub fn device_name(&self) -> String {
        format!(
            "{} on {}",
            self.browser.as_deref().unwrap_or("Unknown"),
            self.os.as_deref().unwrap_or("Unknown")
        )
    }
}

const BROWSER_RULES: &[(&str, &str)] = &[
    (r"\bEdg(?:e|A|iOS)?/", "Edge"),
    (r"\bOPR/|\bOpera\b", "Opera"),
    (r"\bSamsungBrowser/", "Samsung Internet"),
    (r"\bVivaldi/", "Vivaldi"),
    (r"\bFirefox/|\bFxiOS/", "Firefox"),
    (r"\bCriOS/|\bChrome/|\bChromium/", "Chrome"),
    (r"\bVersion/[\d.]+.*\bSafari/", "Safari"),
    (r"\bMSIE\s|\bTrident/", "Internet Explorer"),
];

const OS_RULES: &[(&str, &str)] = &[
    (r"\bWindows Phone\b", "Windows Phone"),
    (r"\bWindows\b", "Windows"),
    (r"\biPhone\b|\biPad\b|\biPod\b", "iOS"),
    (r"\bAndroid\b", "Android"),
    (r"\bCrOS\b", "Chrome OS"),
    (r"\bMac OS X\b|\bMacintosh\b", "macOS"),
    (r"\bLinux\b|\bX11\b", "Linux"),
];

fn compile(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, name)| {
            (
                Regex::new(pattern).expect("Invalid regex pattern defined in code"),
                *name,
            )
        })
        .collect()
}

fn browser_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| compile(BROWSER_RULES))
}

fn os_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| compile(OS_RULES))
}

fn first_match(rules: &[(Regex, &'static str)], ua: &str) -> Option<String> {
    rules
        .iter()
        .find(|(re, _)| re.is_match(ua))
        .map(|(_, name)| (*name).to_string())
}

/// Parses a user agent. Never fails: unrecognised agents yield `None` fields.
#[must_use]
pub fn parse_user_agent(user_agent: Option<&str>) -> UserAgentInfo {
    let Some(ua) = user_agent.map(str::trim).filter(|ua| !ua.is_empty()) else {
        return UserAgentInfo::default();
    };

    UserAgentInfo {
        browser: first_match(browser_rules(), ua),
        os: first_match(os_rules(), ua),
    }
}
