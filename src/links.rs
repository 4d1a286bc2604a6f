/// Outbound links (product shopping searches)

use std::io;
use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

/// Google Shopping search template; the query is appended URL-encoded
const SHOP_SEARCH_BASE: &str = "https://www.google.com/search?tbm=shop&q=";

/// Build a shopping search URL for a free-text query
pub fn shop_url(query: &str) -> String {
    format!("{}{}", SHOP_SEARCH_BASE, urlencoding::encode(query))
}

/// Open a URL in the user's default browser
pub fn open_in_browser(url: &str) -> Result<(), String> {
    if !url.starts_with("https://") {
        return Err(format!("Refusing to open non-https link: {}", url));
    }

    #[cfg(target_os = "macos")]
    let spawned = Command::new("open").arg(url).spawn();

    #[cfg(target_os = "windows")]
    let spawned = Command::new("cmd").args(["/C", "start", "", url]).spawn();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let spawned = Command::new("xdg-open").arg(url).spawn();

    let child = spawned.map_err(|e| format!("Failed to open browser: {}", e))?;
    reap(child).map_err(|e| format!("Failed to watch browser launcher: {}", e))?;
    Ok(())
}

/// Wait for the launcher on a background thread so it never lingers as a zombie
fn reap(mut child: Child) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    thread::Builder::new()
        .name("browser-launcher".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => {
                if !status.success() {
                    log::warn!("⚠️  Browser launcher exited with {}", status);
                }
                Some(status)
            }
            Err(e) => {
                log::warn!("⚠️  Could not wait for browser launcher: {}", e);
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_url_encodes_query() {
        assert_eq!(
            shop_url("arc floor lamp"),
            "https://www.google.com/search?tbm=shop&q=arc%20floor%20lamp"
        );
        assert_eq!(
            shop_url("rug & runner 5/8"),
            "https://www.google.com/search?tbm=shop&q=rug%20%26%20runner%205%2F8"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_launcher_is_waited_for() {
        let child = Command::new("true").spawn().unwrap();
        let status = reap(child).unwrap().join().unwrap();
        assert!(status.is_some_and(|s| s.success()));
    }

    #[test]
    fn test_open_rejects_other_schemes() {
        assert!(open_in_browser("file:///etc/passwd").is_err());
    }
}
