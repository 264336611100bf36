//! Explanations of what each record does.

use colored::Colorize;
use dnsrec::{DkimPolicy, Mechanism, SpfQualifier};

/// Record explanation builder.
pub struct Explain {
    title: String,
    description: String,
    published_at: Vec<String>,
    what_happens: Vec<String>,
    learn_more: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            published_at: Vec::new(),
            what_happens: Vec::new(),
            learn_more: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn publish(mut self, name: &str) -> Self {
        self.published_at.push(name.to_string());
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn rfc(mut self, number: u32) -> Self {
        self.learn_more = Some(format!("https://www.rfc-editor.org/rfc/rfc{number}"));
        self
    }

    /// Print the explanation to stderr, keeping stdout for the records.
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", format!("=== {} ===", self.title).bold().cyan());
        eprintln!("{}", self.description);
        eprintln!();

        if !self.published_at.is_empty() {
            eprintln!("{}", "Published at:".bold());
            for name in &self.published_at {
                eprintln!("  {}", name.green());
            }
            eprintln!();
        }

        if !self.what_happens.is_empty() {
            eprintln!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, step);
            }
            eprintln!();
        }

        if let Some(url) = &self.learn_more {
            eprintln!("{} {}", "Learn more:".bold(), url.cyan().underline());
            eprintln!();
        }
    }

    // ========================================================================
    // Factory methods for each record kind
    // ========================================================================

    pub fn dkim(policy_host: &str, key_host: &str, policy: DkimPolicy, generating: bool) -> Self {
        let policy_step = match policy {
            DkimPolicy::Strict => "Policy t=y;o=- asks receivers to reject unsigned mail (testing mode)",
            DkimPolicy::Relaxed => "Policy t=y;o=~ asks receivers to accept but flag unsigned mail (testing mode)",
        };
        let key_step = if generating {
            "A new RSA key pair is generated with openssl; keep the private key for your mail server"
        } else {
            "Your key pair is used as given; the public half goes into the p= tag"
        };

        Self::new("DKIM")
            .description("Publishes the public key receivers use to verify your mail signatures.")
            .publish(policy_host)
            .publish(key_host)
            .step(key_step)
            .step("The public key is stripped of PEM armour and percent-encoded")
            .step(policy_step)
            .step("Your mail server signs outgoing mail with the private key and this selector")
            .rfc(6376)
    }

    pub fn spf(domain: &str, mechanisms: &[Mechanism], qualifier: &str) -> Self {
        let mut explanation = Self::new("SPF")
            .description("Lists the hosts allowed to send mail for the domain.")
            .publish(domain);

        for mechanism in mechanisms {
            let step = match mechanism {
                Mechanism::A => "a - hosts in the domain's A records may send",
                Mechanism::Mx => "mx - the domain's mail exchangers may send",
                Mechanism::Ip4 | Mechanism::Include => {
                    "ip4 - the listed addresses and ranges may send"
                }
                Mechanism::All => "all - everything else falls through to the qualifier",
            };
            explanation = explanation.step(step);
        }

        let tail = match qualifier.parse::<SpfQualifier>() {
            Ok(q) => format!("{}all - {}", q.symbol(), q.description()),
            Err(_) => format!("{qualifier}all - non-standard qualifier, receivers may ignore it"),
        };
        explanation.step(&tail).rfc(7208)
    }

    pub fn a(host: &str, value: &str) -> Self {
        Self::new("A Record")
            .description(&format!("Points {host} at the IPv4 address {value}."))
            .publish(host)
            .step("The host label is relative to the zone; '@' means the zone apex")
            .step("Resolvers return the address for lookups of the host")
            .rfc(1035)
    }

    pub fn zone(ttl: u32) -> Self {
        Self::new("Zone Snippet")
            .description("Prints all requested records as a zone file fragment.")
            .step(&format!("$TTL {ttl} sets the default cache lifetime in seconds"))
            .step("Lines follow the master file layout: name, class, type, data")
            .rfc(1035)
    }
}
