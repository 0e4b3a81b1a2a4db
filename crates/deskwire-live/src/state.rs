// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle states for the live channel.

use strum::Display;

/// State of the live link, reported to the consumer on every transition.
///
/// The cycle under failure is `Connecting -> Connected -> ReconnectPending ->
/// Connecting -> ...` with a fixed delay before each retry and no retry cap.
/// `Disconnected` is terminal; it is only reached by an explicit close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LinkState {
    /// Closed by the client; no reconnection is pending.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// Frames are flowing.
    Connected,
    /// The link dropped abnormally; one retry is scheduled.
    ReconnectPending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_display_as_snake_case() {
        assert_eq!(LinkState::Disconnected.to_string(), "disconnected");
        assert_eq!(LinkState::Connecting.to_string(), "connecting");
        assert_eq!(LinkState::Connected.to_string(), "connected");
        assert_eq!(LinkState::ReconnectPending.to_string(), "reconnect_pending");
    }
}
