//! Channel-count selection.

use crate::tools::ToolCommand;

/// Channel count used for 5.1 sources when no override is given.
pub const DOWNMIX_CHANNELS: u32 = 2;

/// Channel count to force with `-ac`, or `None` to keep the source layout.
///
/// - an override above 0 always wins
/// - otherwise a layout containing "5.1" is downmixed to stereo
/// - anything else passes through unchanged
pub fn channel_setting(channel_override: u32, channel_layout: &str) -> Option<u32> {
    if channel_override > 0 {
        Some(channel_override)
    } else if channel_layout.contains("5.1") {
        Some(DOWNMIX_CHANNELS)
    } else {
        None
    }
}

/// Append `-ac <n>` when a channel count is forced.
pub fn channel_args(cmd: &mut ToolCommand, channels: Option<u32>) {
    if let Some(count) = channels {
        cmd.arg("-ac").arg(count.to_string());
    }
}
