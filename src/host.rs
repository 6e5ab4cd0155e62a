use std::fmt;

/// Logical backend group an endpoint targets.
///
/// The set is closed; an [`EnvironmentProvider`](crate::EnvironmentProvider) maps each case to a
/// concrete base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiHost {
    /// Backend-for-frontend serving the main app.
    MaxBff,
    /// Backend-for-frontend for innovation features.
    InnovationBff,
    /// Public API gateway.
    MaxGateway,
    /// Web API.
    WebApi,
}

impl ApiHost {
    /// Number of hosts.
    pub const COUNT: usize = 4;

    /// Every host, in declaration order.
    pub const ALL: [ApiHost; Self::COUNT] = [
        ApiHost::MaxBff,
        ApiHost::InnovationBff,
        ApiHost::MaxGateway,
        ApiHost::WebApi,
    ];

    /// Stable name used in logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            ApiHost::MaxBff => "max-bff",
            ApiHost::InnovationBff => "innovation-bff",
            ApiHost::MaxGateway => "max-gateway",
            ApiHost::WebApi => "web-api",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

// `ALL` lists the variants in declaration order, so `index` stays in bounds for every entry.
const _: () = {
    let mut i = 0;
    while i < ApiHost::COUNT {
        assert!(ApiHost::ALL[i].index() == i);
        i += 1;
    }
};

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
