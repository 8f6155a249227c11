//! Profiles command implementation.
//!
//! Lists every profile together with the rule row it applies.

use anyhow::Result;

use kitconf_lib::Profile;

use crate::output::{OutputFormat, print_json, print_section, print_stat};

pub fn cmd_profiles(format: OutputFormat) -> Result<()> {
  if format.is_json() {
    let profiles: Vec<_> = Profile::ALL
      .iter()
      .map(|p| {
        serde_json::json!({
          "name": p.as_str(),
          "default": *p == Profile::default(),
          "description": p.description(),
          "rules": p.rules(),
        })
      })
      .collect();
    return print_json(&profiles);
  }

  for (i, profile) in Profile::ALL.iter().enumerate() {
    let title = if *profile == Profile::default() {
      format!("{} (default)", profile)
    } else {
      profile.to_string()
    };
    if i == 0 {
      println!("{}", title);
    } else {
      print_section(&title);
    }

    let rules = profile.rules();
    println!("  {}", profile.description());
    print_stat("windows threads", yes_no(rules.windows_threads));
    print_stat("windows system libs", yes_no(rules.windows_system_libs));
    print_stat("macos ssl", &rules.macos_ssl.to_string());
    print_stat("unix crypto", &rules.unix_crypto.to_string());
    print_stat("unix ssl define", yes_no(rules.unix_ssl_define));
    print_stat("unix ssl libs", yes_no(rules.unix_ssl_libs));
  }

  Ok(())
}

fn yes_no(value: bool) -> &'static str {
  if value { "yes" } else { "no" }
}
