// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Cert {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: &'static str,
    pub domain: &'static str,
    pub sub_areas: &'static [&'static str],
    pub level: &'static str,
    pub year: u32,
    pub price: u32,
    pub label: &'static str,
    pub role_groups: &'static [&'static str],
    pub tags: &'static [&'static str],
    pub ai: bool,
}

pub const CATALOG: &[Cert] = &[
    Cert {
        id: "gpen",
        name: "GIAC Penetration Tester",
        provider: "GIAC",
        domain: "Security Operations",
        sub_areas: &["Penetration Testing"],
        level: "advanced",
        year: 2019,
        price: 979,
        label: "$979 exam attempt",
        role_groups: &["Red Team Ops"],
        tags: &["pen-testing"],
        ai: false,
    },
    Cert {
        id: "gcih",
        name: "GIAC Certified Incident Handler",
        provider: "GIAC",
        domain: "Security Operations",
        sub_areas: &["Incident Handling"],
        level: "intermediate",
        year: 2000,
        price: 979,
        label: "$979",
        role_groups: &["Blue Team Ops"],
        tags: &["incident-response"],
        ai: false,
    },
    Cert {
        id: "cissp",
        name: "Certified Information Systems Security Professional",
        provider: "ISC2",
        domain: "Security and Risk Management",
        sub_areas: &["GRC"],
        level: "expert",
        year: 1994,
        price: 749,
        label: "$749",
        role_groups: &["Management"],
        tags: &["management"],
        ai: false,
    },
    Cert {
        id: "oscp",
        name: "Offensive Security Certified Professional",
        provider: "OffSec",
        domain: "Security Operations",
        sub_areas: &["Penetration Testing", "Exploitation"],
        level: "advanced",
        year: 2006,
        price: 1649,
        label: "$1,649 course bundle",
        role_groups: &["Red Team Ops"],
        tags: &["offensive"],
        ai: false,
    },
    Cert {
        id: "aws-scs",
        name: "AWS Certified Security Specialty",
        provider: "Amazon Web Services",
        domain: "Security Architecture and Engineering",
        sub_areas: &["Cloud/SysOps"],
        level: "advanced",
        year: 2020,
        price: 300,
        label: "$300",
        role_groups: &["Engineer"],
        tags: &["cloud-security"],
        ai: true,
    },
    Cert {
        id: "isc2-cc",
        name: "Certified in Cybersecurity",
        provider: "ISC2",
        domain: "Security Operations",
        sub_areas: &[],
        level: "foundational",
        year: 2022,
        price: 0,
        label: "Free exam with training",
        role_groups: &["Blue Team Ops"],
        tags: &["entry-level"],
        ai: false,
    },
    Cert {
        id: "vendor-x",
        name: "Vendor X Identity Associate",
        provider: "Vendor X",
        domain: "IAM",
        sub_areas: &[],
        level: "foundational",
        year: 2021,
        price: 0,
        label: "Contact sales",
        role_groups: &["IAM"],
        tags: &["identity"],
        ai: false,
    },
];

/// Ids in the default sort order (level, year, name).
pub const SORTED_IDS: &[&str] = &[
    "cissp", "aws-scs", "gpen", "oscp", "gcih", "isc2-cc", "vendor-x",
];

fn quoted(value: &str) -> String {
    serde_json::to_string(value).expect("quote")
}

fn quoted_list(values: &[&str]) -> String {
    serde_json::to_string(values).expect("quote list")
}

pub fn cert_yaml(cert: &Cert) -> String {
    format!(
        "id: {id}\n\
         name: {name}\n\
         provider: {provider}\n\
         cert_code: {code}\n\
         url: \"https://example.org/{raw_id}\"\n\
         domain_area: {domain}\n\
         sub_areas: {sub_areas}\n\
         tracks: []\n\
         level: {level}\n\
         status: active\n\
         ai_focus: {ai}\n\
         introduced_year: {year}\n\
         last_updated: \"2026-02-27\"\n\
         delivery: exam\n\
         renewal: 3 years\n\
         language: en\n\
         role_groups: {role_groups}\n\
         roles: []\n\
         tags: {tags}\n\
         prerequisites: []\n\
         description: {description}\n\
         summary: {description}\n\
         price_usd: {price}\n\
         price_label: {label}\n\
         price_confidence: estimated\n\
         tooltip_legacy: {tooltip}\n",
        id = quoted(cert.id),
        raw_id = cert.id,
        name = quoted(cert.name),
        provider = quoted(cert.provider),
        code = quoted(&cert.id.to_uppercase()),
        domain = quoted(cert.domain),
        sub_areas = quoted_list(cert.sub_areas),
        level = cert.level,
        ai = cert.ai,
        year = cert.year,
        role_groups = quoted_list(cert.role_groups),
        tags = quoted_list(cert.tags),
        description = quoted(&format!("{} from {}.", cert.name, cert.provider)),
        price = cert.price,
        label = quoted(cert.label),
        tooltip = quoted(&format!("{} - {}", cert.id.to_uppercase(), cert.name)),
    )
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

/// Temp workspace with `data/index.yaml` and one YAML file per record.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let data = dir.path().join("data");
        write_file(
            &data.join("index.yaml"),
            "catalog: Test Certification Catalog\nversion: \"2026.03\"\nlast_reviewed: \"2026-03-01\"\n",
        );
        for cert in CATALOG {
            write_file(
                &data.join("certifications").join(format!("{}.yaml", cert.id)),
                &cert_yaml(cert),
            );
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// certq command isolated from the user's config and environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("certq"));
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("CERTQ_CATALOG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run with `--format json --compact` and parse stdout.
    pub fn json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let assert = cmd
            .args(["--format", "json", "--compact"])
            .args(args)
            .assert()
            .success();
        let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
        serde_json::from_str(&out).expect("json")
    }
}

pub fn ids(results: &Value) -> Vec<String> {
    results
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}
