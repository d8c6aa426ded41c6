//! Generation request construction.
//!
//! A [`GenerationOptions`] holds the flat set of options a user supplied.
//! [`GenerationOptions::build`] resolves the secret type, rejects options
//! that do not apply to it, and produces an immutable [`GenerationRequest`]
//! whose parameter bag contains only the fields that were explicitly set.
//!
//! ## Example
//!
//! ```
//! use credhub_secrets::GenerationOptions;
//!
//! let request = GenerationOptions::new("my-password").build().unwrap();
//! assert_eq!(
//!     serde_json::to_value(&request).unwrap(),
//!     serde_json::json!({"name": "my-password", "type": "password", "overwrite": true}),
//! );
//! ```

use credhub_types::{bail, Result, SecretType};
use serde::Serialize;

/// Key lengths the server accepts for generated keys.
pub const KEY_LENGTHS: [u32; 3] = [2048, 3072, 4096];

const PASSWORD_ONLY: &[SecretType] = &[SecretType::Password];
const SSH_ONLY: &[SecretType] = &[SecretType::Ssh];
const CERTIFICATE_ONLY: &[SecretType] = &[SecretType::Certificate];
const WITH_KEYS: &[SecretType] = &[SecretType::Ssh, SecretType::Rsa, SecretType::Certificate];

/// Flat generation intent, as collected from the command line.
///
/// Every optional field tracks presence explicitly: `None` means "not
/// supplied" and is never sent, while `Some(false)` or `Some(0)` are sent
/// as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Name of the secret to generate
    pub name: String,
    /// Requested type; `None` resolves to [`SecretType::Password`]
    pub secret_type: Option<SecretType>,
    /// Whether an existing secret may be replaced
    pub overwrite: bool,

    /// Password length
    pub length: Option<u32>,
    /// Leave upper case letters out of the password
    pub exclude_upper: Option<bool>,
    /// Leave lower case letters out of the password
    pub exclude_lower: Option<bool>,
    /// Leave digits out of the password
    pub exclude_number: Option<bool>,
    /// Leave special characters out of the password
    pub exclude_special: Option<bool>,
    /// Generate a hexadecimal password
    pub only_hex: Option<bool>,

    /// Key length for ssh, rsa and certificate keys
    pub key_length: Option<u32>,
    /// Comment appended to the SSH public key
    pub ssh_comment: Option<String>,

    /// Certificate common name
    pub common_name: Option<String>,
    /// Certificate organization
    pub organization: Option<String>,
    /// Certificate organization unit
    pub organization_unit: Option<String>,
    /// Certificate locality
    pub locality: Option<String>,
    /// Certificate state or province
    pub state: Option<String>,
    /// Certificate country
    pub country: Option<String>,
    /// Subject alternative names, in the order given
    pub alternative_names: Vec<String>,
    /// Certificate validity in days
    pub duration: Option<u32>,
    /// Name of the CA secret that signs the certificate
    pub ca: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            secret_type: None,
            overwrite: true,
            length: None,
            exclude_upper: None,
            exclude_lower: None,
            exclude_number: None,
            exclude_special: None,
            only_hex: None,
            key_length: None,
            ssh_comment: None,
            common_name: None,
            organization: None,
            organization_unit: None,
            locality: None,
            state: None,
            country: None,
            alternative_names: Vec::new(),
            duration: None,
            ca: None,
        }
    }
}

impl GenerationOptions {
    /// Options for `name` with nothing else supplied.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Resolve these options into a validated request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or has a `.` or `..`
    /// path segment, or if any supplied option does not belong to the
    /// resolved secret type.
    pub fn build(self) -> Result<GenerationRequest> {
        if self.name.is_empty() {
            bail!(Validation, "name required");
        }
        if self.name.split('/').any(|segment| segment == "." || segment == "..") {
            bail!(
                Validation,
                "name must not contain '.' or '..' path segments: {}",
                self.name
            );
        }

        let secret_type = self.secret_type.unwrap_or_default();

        let stray: Vec<&str> = self
            .supplied()
            .into_iter()
            .filter(|(_, allowed)| !allowed.contains(&secret_type))
            .map(|(flag, _)| flag)
            .collect();
        if !stray.is_empty() {
            bail!(
                Validation,
                "The following options are not valid for {} secrets: {}",
                secret_type,
                stray.join(", ")
            );
        }

        let parameters = match secret_type {
            SecretType::Password => GenerationParameters::Password(PasswordParams {
                length: self.length,
                exclude_upper: self.exclude_upper,
                exclude_lower: self.exclude_lower,
                exclude_number: self.exclude_number,
                exclude_special: self.exclude_special,
                only_hex: self.only_hex,
            }),
            SecretType::Ssh => GenerationParameters::Ssh(SshParams {
                key_length: self.key_length,
                ssh_comment: self.ssh_comment,
            }),
            SecretType::Rsa => GenerationParameters::Rsa(RsaParams {
                key_length: self.key_length,
            }),
            SecretType::Certificate => GenerationParameters::Certificate(CertificateParams {
                common_name: self.common_name,
                organization: self.organization,
                organization_unit: self.organization_unit,
                locality: self.locality,
                state: self.state,
                country: self.country,
                alternative_names: (!self.alternative_names.is_empty())
                    .then_some(self.alternative_names),
                key_length: self.key_length,
                duration: self.duration,
                ca: self.ca,
            }),
        };

        tracing::debug!(
            name = %self.name,
            secret_type = %secret_type,
            overwrite = self.overwrite,
            "built generation request"
        );

        Ok(GenerationRequest {
            name: self.name,
            secret_type,
            overwrite: self.overwrite,
            parameters,
        })
    }

    /// Flags that were supplied, with the secret types each one applies to.
    fn supplied(&self) -> Vec<(&'static str, &'static [SecretType])> {
        let flags: [(&'static str, bool, &'static [SecretType]); 17] = [
            ("--length", self.length.is_some(), PASSWORD_ONLY),
            ("--exclude-upper", self.exclude_upper.is_some(), PASSWORD_ONLY),
            ("--exclude-lower", self.exclude_lower.is_some(), PASSWORD_ONLY),
            ("--exclude-number", self.exclude_number.is_some(), PASSWORD_ONLY),
            ("--exclude-special", self.exclude_special.is_some(), PASSWORD_ONLY),
            ("--only-hex", self.only_hex.is_some(), PASSWORD_ONLY),
            ("--key-length", self.key_length.is_some(), WITH_KEYS),
            ("--ssh-comment", self.ssh_comment.is_some(), SSH_ONLY),
            ("--common-name", self.common_name.is_some(), CERTIFICATE_ONLY),
            ("--organization", self.organization.is_some(), CERTIFICATE_ONLY),
            ("--organization-unit", self.organization_unit.is_some(), CERTIFICATE_ONLY),
            ("--locality", self.locality.is_some(), CERTIFICATE_ONLY),
            ("--state", self.state.is_some(), CERTIFICATE_ONLY),
            ("--country", self.country.is_some(), CERTIFICATE_ONLY),
            ("--alternative-name", !self.alternative_names.is_empty(), CERTIFICATE_ONLY),
            ("--duration", self.duration.is_some(), CERTIFICATE_ONLY),
            ("--ca", self.ca.is_some(), CERTIFICATE_ONLY),
        ];

        flags
            .into_iter()
            .filter(|(_, set, _)| *set)
            .map(|(flag, _, allowed)| (flag, allowed))
            .collect()
    }
}

/// Password generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasswordParams {
    /// Password length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Exclude upper case letters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_upper: Option<bool>,
    /// Exclude lower case letters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_lower: Option<bool>,
    /// Exclude digits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_number: Option<bool>,
    /// Exclude special characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_special: Option<bool>,
    /// Hexadecimal characters only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_hex: Option<bool>,
}

impl PasswordParams {
    fn is_empty(&self) -> bool {
        self.length.is_none()
            && self.exclude_upper.is_none()
            && self.exclude_lower.is_none()
            && self.exclude_number.is_none()
            && self.exclude_special.is_none()
            && self.only_hex.is_none()
    }
}

/// SSH key pair generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SshParams {
    /// Key length in bits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
    /// Comment appended to the public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_comment: Option<String>,
}

impl SshParams {
    fn is_empty(&self) -> bool {
        self.key_length.is_none() && self.ssh_comment.is_none()
    }
}

/// RSA key pair generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RsaParams {
    /// Key length in bits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
}

impl RsaParams {
    fn is_empty(&self) -> bool {
        self.key_length.is_none()
    }
}

/// X.509 certificate generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateParams {
    /// Common name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// Organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Organization unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_unit: Option<String>,
    /// Locality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// State or province
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Subject alternative names; order and duplicates are kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_names: Option<Vec<String>>,
    /// Key length in bits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
    /// Validity in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Name of the signing CA secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

impl CertificateParams {
    fn is_empty(&self) -> bool {
        self.common_name.is_none()
            && self.organization.is_none()
            && self.organization_unit.is_none()
            && self.locality.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.alternative_names.is_none()
            && self.key_length.is_none()
            && self.duration.is_none()
            && self.ca.is_none()
    }
}

/// The parameter bag for one secret type.
///
/// Serialized as the bare bag; the enclosing request's `type` field
/// carries the discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenerationParameters {
    /// Password parameters
    Password(PasswordParams),
    /// SSH parameters
    Ssh(SshParams),
    /// RSA parameters
    Rsa(RsaParams),
    /// Certificate parameters
    Certificate(CertificateParams),
}

impl GenerationParameters {
    /// Whether no field of the bag was set.
    pub fn is_empty(&self) -> bool {
        match self {
            GenerationParameters::Password(p) => p.is_empty(),
            GenerationParameters::Ssh(p) => p.is_empty(),
            GenerationParameters::Rsa(p) => p.is_empty(),
            GenerationParameters::Certificate(p) => p.is_empty(),
        }
    }
}

/// Wire payload for `POST /api/v1/data/{name}`.
///
/// Only [`GenerationOptions::build`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    name: String,
    #[serde(rename = "type")]
    secret_type: SecretType,
    overwrite: bool,
    #[serde(skip_serializing_if = "GenerationParameters::is_empty")]
    parameters: GenerationParameters,
}

impl GenerationRequest {
    /// Name of the secret.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved secret type.
    pub fn secret_type(&self) -> SecretType {
        self.secret_type
    }

    /// Whether an existing secret may be replaced.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// The type-specific parameter bag.
    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }
}
