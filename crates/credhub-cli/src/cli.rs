//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use credhub_core::CliConfig;
use credhub_secrets::request::KEY_LENGTHS;
use credhub_secrets::GenerationOptions;
use credhub_types::SecretType;

#[derive(Parser, Debug)]
#[command(name = "credhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the CredHub secrets service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and set a credential value
    #[command(visible_alias = "n")]
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Name of the credential to generate
    #[arg(short = 'n', long)]
    pub name: String,

    /// Sets the credential type to generate (password, ssh, rsa, certificate)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub secret_type: Option<SecretType>,

    /// Sets overwrite to false; an existing credential is left untouched
    #[arg(short = 'O', long)]
    pub no_overwrite: bool,

    /// [Password] Length of the generated value
    #[arg(short = 'l', long)]
    pub length: Option<u32>,

    /// [Password] Exclude special characters from the generated value
    #[arg(short = 'S', long)]
    pub exclude_special: bool,

    /// [Password] Exclude number characters from the generated value
    #[arg(short = 'N', long)]
    pub exclude_number: bool,

    /// [Password] Exclude upper alpha characters from the generated value
    #[arg(short = 'U', long)]
    pub exclude_upper: bool,

    /// [Password] Exclude lower alpha characters from the generated value
    #[arg(short = 'L', long)]
    pub exclude_lower: bool,

    /// [Password] Use only hexadecimal characters in the generated value
    #[arg(short = 'H', long)]
    pub only_hex: bool,

    /// [Certificate] Common name of the generated certificate
    #[arg(short = 'c', long)]
    pub common_name: Option<String>,

    /// [Certificate] Organization of the generated certificate
    #[arg(short = 'o', long)]
    pub organization: Option<String>,

    /// [Certificate] Organization unit of the generated certificate
    #[arg(short = 'u', long)]
    pub organization_unit: Option<String>,

    /// [Certificate] Locality/city of the generated certificate
    #[arg(short = 'i', long)]
    pub locality: Option<String>,

    /// [Certificate] State/province of the generated certificate
    #[arg(short = 's', long)]
    pub state: Option<String>,

    /// [Certificate] Country of the generated certificate
    #[arg(short = 'y', long)]
    pub country: Option<String>,

    /// [Certificate] A subject alternative name; may be repeated
    #[arg(short = 'a', long = "alternative-name")]
    pub alternative_names: Vec<String>,

    /// [Certificate, SSH, RSA] Bit length of the generated key (2048, 3072, 4096)
    #[arg(short = 'k', long, value_parser = parse_key_length)]
    pub key_length: Option<u32>,

    /// [Certificate] Valid duration (in days) of the generated certificate
    #[arg(short = 'd', long)]
    pub duration: Option<u32>,

    /// [SSH] Comment appended to the public key
    #[arg(short = 'm', long)]
    pub ssh_comment: Option<String>,

    /// [Certificate] Name of the CA that signs the generated certificate
    #[arg(long = "ca")]
    pub ca: Option<String>,

    /// Return response in JSON format
    #[arg(long)]
    pub output_json: bool,
}

impl GenerateArgs {
    /// The flat generation options these arguments describe.
    ///
    /// Boolean switches only ever add `true`: an absent switch stays unset.
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            name: self.name.clone(),
            secret_type: self.secret_type,
            overwrite: !self.no_overwrite,
            length: self.length,
            exclude_upper: switch(self.exclude_upper),
            exclude_lower: switch(self.exclude_lower),
            exclude_number: switch(self.exclude_number),
            exclude_special: switch(self.exclude_special),
            only_hex: switch(self.only_hex),
            key_length: self.key_length,
            ssh_comment: self.ssh_comment.clone(),
            common_name: self.common_name.clone(),
            organization: self.organization.clone(),
            organization_unit: self.organization_unit.clone(),
            locality: self.locality.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            alternative_names: self.alternative_names.clone(),
            duration: self.duration,
            ca: self.ca.clone(),
        }
    }
}

fn switch(set: bool) -> Option<bool> {
    set.then_some(true)
}

fn parse_key_length(s: &str) -> std::result::Result<u32, String> {
    let bits: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;

    if KEY_LENGTHS.contains(&bits) {
        Ok(bits)
    } else {
        Err(format!("{} is not an allowed key length (2048, 3072, 4096)", bits))
    }
}

impl Cli {
    pub async fn execute(&self, config: &CliConfig) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Generate(args) => {
                generate::execute(args, config).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let argv = ["credhub", "generate"].iter().chain(args.iter());
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(args) => args,
        }
    }

    #[test]
    fn test_short_flags() {
        let args = generate_args(&[
            "-n", "my-secret", "-t", "certificate", "-O", "-c", "common.name.io",
            "-o", "organization.io", "-u", "My Unit", "-i", "My Locality", "-s", "My State",
            "-y", "My Country", "-a", "Alt1", "-a", "Alt2", "-k", "2048", "-d", "1000",
        ]);
        let options = args.options();

        assert_eq!(options.name, "my-secret");
        assert_eq!(options.secret_type, Some(SecretType::Certificate));
        assert!(!options.overwrite);
        assert_eq!(options.common_name.as_deref(), Some("common.name.io"));
        assert_eq!(options.organization.as_deref(), Some("organization.io"));
        assert_eq!(options.organization_unit.as_deref(), Some("My Unit"));
        assert_eq!(options.locality.as_deref(), Some("My Locality"));
        assert_eq!(options.state.as_deref(), Some("My State"));
        assert_eq!(options.country.as_deref(), Some("My Country"));
        assert_eq!(options.alternative_names, vec!["Alt1", "Alt2"]);
        assert_eq!(options.key_length, Some(2048));
        assert_eq!(options.duration, Some(1000));
    }

    #[test]
    fn test_password_short_flags() {
        let options = generate_args(&["-n", "p", "-l", "42", "-S", "-N", "-U", "-L", "-H"]).options();

        assert_eq!(options.length, Some(42));
        assert_eq!(options.exclude_special, Some(true));
        assert_eq!(options.exclude_number, Some(true));
        assert_eq!(options.exclude_upper, Some(true));
        assert_eq!(options.exclude_lower, Some(true));
        assert_eq!(options.only_hex, Some(true));
    }

    #[test]
    fn test_absent_switches_stay_unset() {
        let options = generate_args(&["--name", "p"]).options();

        assert!(options.overwrite);
        assert_eq!(options.secret_type, None);
        assert_eq!(options.exclude_upper, None);
        assert_eq!(options.only_hex, None);
        assert!(options.alternative_names.is_empty());
    }

    #[test]
    fn test_ssh_comment_and_ca() {
        let options = generate_args(&["-n", "k", "-t", "ssh", "-m", "i am an ssh comment"]).options();
        assert_eq!(options.ssh_comment.as_deref(), Some("i am an ssh comment"));

        let options = generate_args(&["-n", "c", "-t", "certificate", "--ca", "my_ca"]).options();
        assert_eq!(options.ca.as_deref(), Some("my_ca"));
    }

    #[test]
    fn test_generate_alias() {
        let cli = Cli::try_parse_from(["credhub", "n", "-n", "my-password"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate(ref args) if args.name == "my-password"));
    }

    #[test]
    fn test_name_is_required() {
        let err = Cli::try_parse_from(["credhub", "generate"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("--name"));
    }

    #[test]
    fn test_key_length_must_be_allowed() {
        assert_eq!(parse_key_length("3072"), Ok(3072));
        assert!(parse_key_length("1024").is_err());
        assert!(parse_key_length("big").is_err());
        assert!(Cli::try_parse_from(["credhub", "generate", "-n", "k", "-k", "1000"]).is_err());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(Cli::try_parse_from(["credhub", "generate", "-n", "k", "-t", "value"]).is_err());
    }
}
