//! Rule-based user-agent classification.
//!
//! Each axis is an ordered table evaluated top to bottom; the first rule whose
//! needle occurs in the user agent wins. Order matters: Edge user agents also
//! carry `Chrome`, Chrome ones carry `Safari`, Android ones carry `Linux`.

use crate::domain::entities::{Browser, ClientInfo, Device, Platform};

const BROWSER_RULES: &[(&[&str], Browser)] = &[
    (&["Edg"], Browser::Edge),
    (&["Chrome"], Browser::Chrome),
    (&["Firefox"], Browser::Firefox),
    (&["Safari"], Browser::Safari),
    (&["Opera", "OPR"], Browser::Opera),
];

/// Platform rules; a device of `None` keeps the `Desktop` default.
const PLATFORM_RULES: &[(&str, Platform, Option<Device>)] = &[
    ("Windows", Platform::Windows, None),
    ("Mac", Platform::MacOs, None),
    ("Linux", Platform::Linux, None),
    ("Android", Platform::Android, Some(Device::Mobile)),
    ("iPad", Platform::Ios, Some(Device::Tablet)),
    ("iPhone", Platform::Ios, Some(Device::Mobile)),
];

/// Classifies a raw user-agent string into browser, platform and device.
///
/// Never fails: unmatched axes fall back to `Unknown` (browser, platform)
/// and `Desktop` (device).
///
/// ```
/// use linkmeter::domain::classifier::classify;
/// use linkmeter::domain::entities::{Browser, Device};
///
/// let info = classify("Mozilla/5.0 (Windows NT 10.0) Chrome/100.0 Safari/537.36 Edg/100.0");
/// assert_eq!(info.browser, Browser::Edge);
/// assert_eq!(info.device, Device::Desktop);
/// ```
pub fn classify(user_agent: &str) -> ClientInfo {
    let browser = BROWSER_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| user_agent.contains(n)))
        .map(|(_, browser)| *browser)
        .unwrap_or(Browser::Unknown);

    let (platform, mut device) = PLATFORM_RULES
        .iter()
        .find(|(needle, _, _)| user_agent.contains(needle))
        .map(|(_, platform, device)| (*platform, device.unwrap_or(Device::Desktop)))
        .unwrap_or((Platform::Unknown, Device::Desktop));

    if device == Device::Desktop && user_agent.contains("Mobile") {
        device = Device::Mobile;
    }

    ClientInfo {
        browser,
        platform,
        device,
    }
}
