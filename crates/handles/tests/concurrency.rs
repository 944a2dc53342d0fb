//! Stress tests for concurrent allocate/get/free.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use handles::{Handle, HandleError, HandleKind, HandleTable};
use once_cell::sync::Lazy;

const SLOTS: usize = 8;
const ROUNDS: usize = 2_000;

#[derive(Debug)]
struct Record {
    owner: usize,
    checksum: u32,
}

impl Record {
    fn new(owner: usize) -> Self {
        Self {
            owner,
            checksum: owner as u32 ^ 0xA5A5_A5A5,
        }
    }

    fn is_intact(&self) -> bool {
        self.checksum == self.owner as u32 ^ 0xA5A5_A5A5
    }
}

static POOL: Lazy<HandleTable<Record, SLOTS>> = Lazy::new(|| HandleTable::new(HandleKind::Vendor));
static IN_USE: Lazy<[AtomicBool; SLOTS]> = Lazy::new(|| core::array::from_fn(|_| AtomicBool::new(false)));

#[test]
fn pooled_slots_are_never_shared() {
    let workers: Vec<_> = (0..SLOTS)
        .map(|owner| {
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    let handle = match POOL.allocate_any_with(|| Record::new(owner)) {
                        Ok(handle) => handle,
                        Err(HandleError::Exhausted { .. }) => continue,
                        Err(other) => panic!("unexpected allocation error: {other}"),
                    };

                    let slot = handle.index();
                    assert!(
                        !IN_USE[slot].swap(true, Ordering::SeqCst),
                        "slot {slot} handed out twice"
                    );

                    let record = POOL.get(handle).expect("own handle resolves");
                    assert_eq!(record.owner, owner);
                    assert!(record.is_intact());

                    IN_USE[slot].store(false, Ordering::SeqCst);
                    POOL.free(handle);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(POOL.stats().allocated, 0);
}

#[test]
fn indexed_allocation_has_one_winner_per_index() {
    let table: Arc<HandleTable<Record, 1>> = Arc::new(HandleTable::new(HandleKind::AnalogOutput));
    let winners = Arc::new(AtomicU32::new(0));

    let contenders: Vec<_> = (0..8)
        .map(|owner| {
            let table = Arc::clone(&table);
            let winners = Arc::clone(&winners);
            thread::spawn(move || match table.allocate_with(0, || Record::new(owner)) {
                Ok(_) => {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
                Err(err) => assert_eq!(err, HandleError::AlreadyAllocated { index: 0 }),
            })
        })
        .collect();

    for contender in contenders {
        contender.join().unwrap();
    }
    assert_eq!(winners.load(Ordering::SeqCst), 1);
}

#[test]
fn readers_see_whole_records_or_nothing() {
    let table: Arc<HandleTable<Record, 2>> = Arc::new(HandleTable::new(HandleKind::AnalogOutput));
    let published = Arc::new(AtomicU32::new(Handle::INVALID.raw()));
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let table = Arc::clone(&table);
        let published = Arc::clone(&published);
        thread::spawn(move || {
            for round in 0..ROUNDS {
                let handle = table
                    .allocate_with(round % 2, || Record::new(round))
                    .expect("writer owns the table");
                published.store(handle.raw(), Ordering::SeqCst);
                table.free(handle);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            let published = Arc::clone(&published);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut seen = 0usize;
                while !done.load(Ordering::SeqCst) {
                    let handle = Handle::from_raw(published.load(Ordering::SeqCst));
                    if let Some(record) = table.get(handle) {
                        assert!(record.is_intact());
                        seen += 1;
                    }
                }
                seen
            })
        })
        .collect();

    writer.join().unwrap();
    done.store(true, Ordering::SeqCst);
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(table.stats().allocated, 0);
}
