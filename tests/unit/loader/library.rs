use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::*;
use crate::foundation::error::StillreelError;

fn wait_for_state(loader: &LibraryLoader, want: LoadState) {
    for _ in 0..2_000 {
        if loader.state() == want {
            return;
        }
        thread::sleep(Duration::from_millis(1));
    }
    panic!("loader never reached {want:?}, stuck at {:?}", loader.state());
}

#[test]
fn first_request_loads_and_later_requests_reuse_it() {
    let loader = LibraryLoader::new();
    assert_eq!(loader.state(), LoadState::Idle);

    loader.ensure_loaded(|| Ok(())).unwrap();
    assert!(loader.is_loaded());

    loader
        .ensure_loaded(|| panic!("must not load twice"))
        .unwrap();
    assert_eq!(loader.loads_issued(), 1);
}

#[test]
fn failure_is_terminal_and_repeats_the_same_error() {
    let loader = LibraryLoader::new();
    let first = loader
        .ensure_loaded(|| Err(StillreelError::encode("cdn unreachable")))
        .unwrap_err();
    assert!(first.to_string().contains("cdn unreachable"));

    let second = loader.ensure_loaded(|| Ok(())).unwrap_err();
    assert_eq!(first, second);
    assert!(matches!(loader.state(), LoadState::Failed(_)));
    assert_eq!(loader.loads_issued(), 1);
}

#[test]
fn concurrent_requests_share_one_load_and_are_all_served() {
    let loader = Arc::new(LibraryLoader::new());
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let owner = {
        let loader = Arc::clone(&loader);
        thread::spawn(move || {
            loader.ensure_loaded(move || {
                release_rx.recv().unwrap();
                Ok(())
            })
        })
    };

    wait_for_state(&loader, LoadState::Loading);
    let waiting = loader.request(|| panic!("second load must not be issued"));
    assert!(waiting.try_recv().is_err(), "served before settlement");

    release_tx.send(()).unwrap();
    owner.join().unwrap().unwrap();
    waiting.recv().unwrap().unwrap();
    assert_eq!(loader.loads_issued(), 1);
}

#[test]
fn dropped_waiter_does_not_block_later_waiters() {
    let loader = Arc::new(LibraryLoader::new());
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let owner = {
        let loader = Arc::clone(&loader);
        thread::spawn(move || {
            loader.ensure_loaded(move || {
                release_rx.recv().unwrap();
                Err(StillreelError::encode("boom"))
            })
        })
    };

    wait_for_state(&loader, LoadState::Loading);
    drop(loader.request(|| Ok(())));
    let kept = loader.request(|| Ok(()));

    release_tx.send(()).unwrap();
    assert!(owner.join().unwrap().is_err());
    assert!(kept.recv().unwrap().is_err());
}

#[test]
fn panicking_load_releases_waiters_as_abandoned() {
    let loader = Arc::new(LibraryLoader::new());
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let owner = {
        let loader = Arc::clone(&loader);
        thread::spawn(move || {
            loader.ensure_loaded(move || {
                release_rx.recv().unwrap();
                panic!("encoder init blew up");
            })
        })
    };

    wait_for_state(&loader, LoadState::Loading);
    let waiting = loader.request(|| Ok(()));

    release_tx.send(()).unwrap();
    assert!(owner.join().is_err());
    assert_eq!(waiting.recv().unwrap(), Err(LoadError::Abandoned));
    assert_eq!(loader.state(), LoadState::Failed(LoadError::Abandoned));
    assert_eq!(
        loader.ensure_loaded(|| Ok(())),
        Err(LoadError::Abandoned)
    );
    assert_eq!(loader.loads_issued(), 1);
}
