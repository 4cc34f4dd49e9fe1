//! Registry commands.

use std::io::Write;

use anyhow::{Context, Result};
use ark_anvl::marshal::record_from_args;
use ark_anvl_client::{RegistryClient, SessionStore, Transport};

use super::Batch;
use crate::output::Printer;

/// `get`: fetches and prints each identifier's metadata.
pub fn get<T: Transport, W: Write>(
    client: &RegistryClient<T>,
    ids: &[String],
    printer: &mut Printer<W>,
) -> Result<()> {
    printer.begin()?;
    let mut batch = Batch::default();
    for id in ids {
        if let Some(record) = batch.check(id, client.get(id)) {
            printer.record(&record)?;
        }
    }
    log::debug!("printed {} of {} records", printer.written(), ids.len());
    batch.finish(ids.len())
}

/// `mint`: mints `count` identifiers with the same metadata.
pub fn mint<T: Transport, W: Write>(
    client: &RegistryClient<T>,
    count: u32,
    elements: &[String],
    mut out: W,
) -> Result<()> {
    let metadata = record_from_args(elements).context("invalid element argument")?;
    let shoulder = client.base().base();
    let mut batch = Batch::default();
    for _ in 0..count {
        if let Some(ark) = batch.check(&shoulder, client.mint(&metadata)) {
            writeln!(out, "{ark}")?;
        }
    }
    batch.finish(count as usize)
}

/// `create`: creates one identifier with a chosen name.
pub fn create<T: Transport, W: Write>(
    client: &RegistryClient<T>,
    id: &str,
    elements: &[String],
    mut out: W,
) -> Result<()> {
    let metadata = record_from_args(elements).context("invalid element argument")?;
    let ark = client
        .create(id, &metadata)
        .with_context(|| format!("failed to create {id}"))?;
    writeln!(out, "{ark}")?;
    Ok(())
}

/// `update`: sets metadata elements on one identifier.
pub fn update<T: Transport, W: Write>(
    client: &RegistryClient<T>,
    id: &str,
    elements: &[String],
    mut out: W,
) -> Result<()> {
    let metadata = record_from_args(elements).context("invalid element argument")?;
    let ark = client
        .update(id, &metadata)
        .with_context(|| format!("failed to update {id}"))?;
    writeln!(out, "{ark}")?;
    Ok(())
}

/// `delete`: deletes each identifier.
pub fn delete<T: Transport, W: Write>(
    client: &RegistryClient<T>,
    ids: &[String],
    mut out: W,
) -> Result<()> {
    let mut batch = Batch::default();
    for id in ids {
        if let Some(ark) = batch.check(id, client.delete(id)) {
            writeln!(out, "{ark}")?;
        }
    }
    batch.finish(ids.len())
}

/// `login`: authenticates and stores the session cookie.
pub fn login<T: Transport, W: Write>(
    client: &mut RegistryClient<T>,
    store: &SessionStore,
    mut out: W,
) -> Result<()> {
    let cookie = client.login().context("login failed")?;
    store.save(&cookie)?;
    writeln!(out, "session saved to {}", store.path().display())?;
    Ok(())
}

/// `logout`: ends the session and removes the stored cookie.
pub fn logout<T: Transport, W: Write>(
    client: &mut RegistryClient<T>,
    store: &SessionStore,
    mut out: W,
) -> Result<()> {
    if client.session().is_some() {
        client.logout().context("logout failed")?;
    }
    if store.clear()? {
        writeln!(out, "session removed from {}", store.path().display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputArgs;
    use ark_anvl::{AnvlRecord, BaseConfig};
    use ark_anvl_client::{Credentials, SimulatedRegistry};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn seeded() -> SimulatedRegistry {
        let registry = SimulatedRegistry::new();
        registry.insert(
            "ark:/99999/fk4qc17z06",
            [("erc.who", "Quinn"), ("erc.what", "The Eskimo, really")]
                .into_iter()
                .collect(),
        );
        registry
    }

    fn client(registry: &SimulatedRegistry) -> RegistryClient<&SimulatedRegistry> {
        RegistryClient::new(registry, BaseConfig::default())
    }

    #[test]
    fn get_prints_csv_rows() {
        let registry = seeded();
        let args = OutputArgs {
            csv: Some("ark:erc.who:erc.what".parse().unwrap()),
            header: true,
            ..OutputArgs::default()
        };
        let mut printer = Printer::new(Vec::new(), &args);
        get(&client(&registry), &strings(&["qc17z06"]), &mut printer).unwrap();
        assert_eq!(
            String::from_utf8(printer.into_inner()).unwrap(),
            "ark,erc.who,erc.what\nark:/99999/fk4qc17z06,Quinn,\"The Eskimo, really\"\n"
        );
    }

    #[test]
    fn get_reports_missing_and_continues() {
        let registry = seeded();
        let mut printer = Printer::new(Vec::new(), &OutputArgs::default());
        let err = get(
            &client(&registry),
            &strings(&["zz99", "fk4qc17z06"]),
            &mut printer,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 failed");
        assert_eq!(printer.written(), 1);
    }

    #[test]
    fn mint_count_mints_each() {
        let registry = SimulatedRegistry::new();
        let mut out = Vec::new();
        mint(&client(&registry), 3, &strings(&["erc.who:Quinn"]), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 3);
        assert!(printed.lines().all(|l| l.starts_with("ark:/99999/fk4")));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn mint_rejects_bad_element_before_any_request() {
        let registry = SimulatedRegistry::new();
        let result = mint(&client(&registry), 1, &strings(&["oops"]), Vec::new());
        assert!(result.is_err());
        assert!(registry.requests().is_empty());
    }

    #[test]
    fn create_update_delete() {
        let registry = SimulatedRegistry::new();
        let client = client(&registry);
        let mut out = Vec::new();

        create(&client, "x2w", &strings(&["erc.who:Quinn"]), &mut out).unwrap();
        update(&client, "fk4x2w", &strings(&["erc.when:1978"]), &mut out).unwrap();
        let record = registry.record("ark:/99999/fk4x2w").unwrap();
        assert_eq!(record.get("erc.when"), Some("1978"));

        delete(&client, &strings(&["x2w"]), &mut out).unwrap();
        assert!(registry.is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ark:/99999/fk4x2w\nark:/99999/fk4x2w\nark:/99999/fk4x2w\n"
        );
    }

    #[test]
    fn update_of_missing_identifier_fails() {
        let registry = SimulatedRegistry::new();
        let err = update(&client(&registry), "x2w", &strings(&["a:b"]), Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("no such identifier"));
    }

    #[test]
    fn login_then_logout_manages_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session"));
        let account = Credentials::new("apitest", "apitest");
        let registry = SimulatedRegistry::with_account(account.clone());

        let mut client = client(&registry).with_credentials(account);
        login(&mut client, &store, Vec::new()).unwrap();
        let cookie = store.load().unwrap().unwrap();

        let mut next = RegistryClient::new(&registry, BaseConfig::default()).with_session(cookie);
        next.mint(&AnvlRecord::new()).unwrap();

        let mut out = Vec::new();
        logout(&mut next, &store, &mut out).unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(String::from_utf8(out).unwrap().starts_with("session removed"));
    }

    #[test]
    fn logout_without_session_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session"));
        let registry = SimulatedRegistry::new();

        let mut out = Vec::new();
        logout(&mut client(&registry), &store, &mut out).unwrap();
        assert!(out.is_empty());
        assert!(registry.requests().is_empty());
    }
}
