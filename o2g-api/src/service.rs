/// Logical services exposed by the O2G gateway
///
/// Each service has its own base URI, learnt either during bootstrap (gateway,
/// authentication, sessions) or from the service list returned when a session
/// is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceId {
    /// Gateway root resource, advertises the API versions
    Gateway,
    Authentication,
    Sessions,
    Subscriptions,
    EventSummary,
    /// Telephony, whatever name the gateway advertises it under
    Telephony,
    Users,
    Routing,
    Messaging,
    Maintenance,
    Directory,
    PbxManagement,
    CommunicationLog,
    PhoneSetProgramming,
    CallCenterAgent,
    CallCenterRsi,
    Analytics,
}

impl ServiceId {
    /// Every service identifier, in declaration order
    pub const ALL: [ServiceId; 17] = [
        ServiceId::Gateway,
        ServiceId::Authentication,
        ServiceId::Sessions,
        ServiceId::Subscriptions,
        ServiceId::EventSummary,
        ServiceId::Telephony,
        ServiceId::Users,
        ServiceId::Routing,
        ServiceId::Messaging,
        ServiceId::Maintenance,
        ServiceId::Directory,
        ServiceId::PbxManagement,
        ServiceId::CommunicationLog,
        ServiceId::PhoneSetProgramming,
        ServiceId::CallCenterAgent,
        ServiceId::CallCenterRsi,
        ServiceId::Analytics,
    ];

    /// Name of the service as advertised by the gateway
    pub fn name(&self) -> &'static str {
        match self {
            ServiceId::Gateway => "O2G",
            ServiceId::Authentication => "authenticate",
            ServiceId::Sessions => "sessions",
            ServiceId::Subscriptions => "subscriptions",
            ServiceId::EventSummary => "eventsummary",
            ServiceId::Telephony => "telephony",
            ServiceId::Users => "users",
            ServiceId::Routing => "routing",
            ServiceId::Messaging => "voicemail",
            ServiceId::Maintenance => "maintenance",
            ServiceId::Directory => "directory",
            ServiceId::PbxManagement => "pbxmanagement",
            ServiceId::CommunicationLog => "comlog",
            ServiceId::PhoneSetProgramming => "phonesetprogramming",
            ServiceId::CallCenterAgent => "acdagent",
            ServiceId::CallCenterRsi => "acdrsi",
            ServiceId::Analytics => "analytics",
        }
    }

    /// Resolve an advertised service name, ignoring case
    ///
    /// Returns `None` for names this SDK does not know about.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }

    /// Position of this identifier in [`ServiceId::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
