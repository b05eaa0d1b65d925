/// Connection state of one live channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Error,
}

impl ChannelState {
    /// Reconnect is offered unless a connection attempt is already running.
    pub fn can_reconnect(&self) -> bool {
        !matches!(self, ChannelState::Connecting | ChannelState::Reconnecting)
    }

    /// Placeholder text shown while no frame is available.
    pub fn placeholder(&self) -> &'static str {
        match self {
            ChannelState::Connected => "Waiting for video...",
            ChannelState::Connecting => "Connecting...",
            ChannelState::Reconnecting => "Reconnecting...",
            ChannelState::Disconnected | ChannelState::Error => "No connection to the camera",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChannelState::Disconnected => "disconnected",
            ChannelState::Connecting => "connecting",
            ChannelState::Connected => "live",
            ChannelState::Reconnecting => "reconnecting",
            ChannelState::Error => "error",
        }
    }
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
