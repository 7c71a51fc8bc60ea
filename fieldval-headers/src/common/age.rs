use std::time::Duration;

derive_number_header! {
    #[header(name = ::http::header::AGE)]
    /// `Age` header, defined in [RFC9111](https://www.rfc-editor.org/rfc/rfc9111#section-5.1)
    ///
    /// The "Age" response header field conveys the sender's estimate of the
    /// time since the response was generated or successfully validated at
    /// the origin server, in seconds.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Age = delta-seconds
    /// ```
    pub struct Age(pub u64);
}

impl Age {
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl From<Duration> for Age {
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs())
    }
}
