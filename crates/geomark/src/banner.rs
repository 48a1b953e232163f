use crate::{VERSION, core::mode::Mode};

const ART: &str = r"
  ____  _____  ___   __  __     _     ____   _  __
 / ___|| ____|/ _ \ |  \/  |   / \   |  _ \ | |/ /
| |  _ |  _| | | | || |\/| |  / _ \  | |_) || ' /
| |_| || |___| |_| || |  | | / ___ \ |  _ < | . \
 \____||_____|\___/ |_|  |_|/_/   \_\|_| \_\|_|\_\";

/// Startup banner, suffixed with the version and the mode label.
#[must_use]
pub fn render(mode: Mode) -> String {
    format!("{ART} v{VERSION} {}\n", mode.label())
}
