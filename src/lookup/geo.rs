//! IP geolocation against local MaxMind datasets.
//!
//! # Responsibilities
//! - Load GeoLite2 City (and optionally ASN) databases at startup
//! - Map an IP address to a [`GeoRecord`]
//!
//! # Design Decisions
//! - Databases are optional; the service runs without them and every
//!   lookup simply misses
//! - A miss returns `None`, serialized as `null` — it is not an error
//! - Readers are immutable after load and shared via Arc, so lookups
//!   need no locking

use std::net::IpAddr;

use maxminddb::Reader;
use serde::Serialize;

use crate::config::GeoIpConfig;

/// Approximate location facts for an IP address.
///
/// Field availability depends on the loaded dataset; `org` is only
/// populated when an ASN database is present.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeoRecord {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub timezone: Option<String>,
    /// Latitude/longitude pair, present only when both coordinates are known.
    pub ll: Option<[f64; 2]>,
    pub metro: Option<u16>,
    /// Matched network range. The reader API does not expose the matched
    /// prefix, so this is always `null` with the current dataset wrapper.
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
}

/// Immutable handle to the loaded GeoIP databases.
pub struct GeoDatabase {
    city: Option<Reader<Vec<u8>>>,
    asn: Option<Reader<Vec<u8>>>,
}

impl GeoDatabase {
    /// Open the configured databases.
    ///
    /// A missing or unreadable file is logged and skipped; lookups against
    /// an absent database return `None`.
    pub fn open(config: &GeoIpConfig) -> Self {
        let city = config.city_db_path.as_deref().and_then(|path| {
            match Reader::open_readfile(path) {
                Ok(reader) => {
                    tracing::info!(path = %path, "GeoIP city database loaded");
                    Some(reader)
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "GeoIP city database unavailable");
                    None
                }
            }
        });

        let asn = config.asn_db_path.as_deref().and_then(|path| {
            match Reader::open_readfile(path) {
                Ok(reader) => {
                    tracing::info!(path = %path, "GeoIP ASN database loaded");
                    Some(reader)
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "GeoIP ASN database unavailable");
                    None
                }
            }
        });

        if city.is_none() {
            tracing::info!("GeoIP lookups disabled; location will be null");
        }

        Self { city, asn }
    }

    /// An empty database handle, every lookup misses.
    pub fn disabled() -> Self {
        Self { city: None, asn: None }
    }

    /// Whether a city database is loaded.
    pub fn is_enabled(&self) -> bool {
        self.city.is_some()
    }

    /// Look up an IP address.
    ///
    /// Returns `None` when no database is loaded or the address has no
    /// match — both are expected outcomes.
    pub fn lookup(&self, ip: IpAddr) -> Option<GeoRecord> {
        let city_reader = self.city.as_ref()?;

        // maxminddb 0.27 API: lookup() returns a LookupResult; has_data()
        // distinguishes a miss from a hit before decoding.
        let city_lookup = city_reader.lookup(ip).ok()?;
        if !city_lookup.has_data() {
            return None;
        }
        let city: maxminddb::geoip2::City = match city_lookup.decode() {
            Ok(Some(city)) => city,
            _ => return None,
        };

        let ll = match (city.location.latitude, city.location.longitude) {
            (Some(lat), Some(lon)) => Some([lat, lon]),
            _ => None,
        };

        let region = city
            .subdivisions
            .first()
            .and_then(|subdivision| subdivision.iso_code)
            .map(|s| s.to_string());

        Some(GeoRecord {
            country: city.country.iso_code.map(|s| s.to_string()),
            region,
            city: city.city.names.english.map(|s| s.to_string()),
            timezone: city.location.time_zone.map(|s| s.to_string()),
            ll,
            metro: city.location.metro_code,
            range: None,
            org: self.lookup_org(ip),
        })
    }

    /// Organization string from the ASN database, when one is loaded.
    fn lookup_org(&self, ip: IpAddr) -> Option<String> {
        let asn_reader = self.asn.as_ref()?;
        let asn_lookup = asn_reader.lookup(ip).ok()?;
        if !asn_lookup.has_data() {
            return None;
        }
        let asn: maxminddb::geoip2::Asn = asn_lookup.decode().ok()??;
        asn.autonomous_system_organization.map(|s| s.to_string())
    }
}
