//! Full lifecycle: deposits, rebalancing through an external venue, proof
//! recording, a flash-settled round trip, yield skim, and full redemption.

use coffer_kernel::mocks::{MockProofStore, MockVenue};
use coffer_kernel::{ExternalVenue, KernelError, ProofStore, VaultKernel};
use coffer_ledger::Funds;
use coffer_types::{AssetId, HolderId, PolicyId};

fn usdc() -> AssetId {
    AssetId::new("USDC")
}

#[test]
fn full_rebalance_cycle() {
    let (mut kernel, controller, operator) = VaultKernel::bootstrap(HolderId::new("genesis"));
    let operator = operator.transfer(HolderId::new("agent-1"));
    let pool = kernel.create_pool(&controller, usdc()).unwrap();

    let alice = HolderId::new("alice");
    let bob = HolderId::new("bob");
    let mut venue = MockVenue::new("lending-venue");
    let mut proofs = MockProofStore::new();

    // Two depositors fund the pool; claims mint 1:1.
    let minted = kernel
        .deposit(pool, Funds::new(usdc(), 100_000), &alice)
        .unwrap();
    assert_eq!(minted, 100_000);
    kernel
        .deposit(pool, Funds::new(usdc(), 50_000), &bob)
        .unwrap();
    assert_eq!(kernel.balance_minor(pool).unwrap(), 150_000);
    assert_eq!(kernel.total_claims(pool).unwrap(), 150_000);

    // Operator shifts most of the pot to the venue and records why, in one
    // atomic unit of work.
    let blob_ref = proofs.put(b"venue rate 4.1% vs idle 0%");
    kernel
        .execute(|unit| {
            let shifted = unit.rebalance_out(&operator, pool, 90_000, venue.tag())?;
            venue.deploy(shifted);
            unit.record_encrypted_proof(
                &operator,
                pool,
                blob_ref.clone(),
                PolicyId::new("seal-policy-1"),
            )?;
            Ok(())
        })
        .unwrap();
    assert_eq!(kernel.balance_minor(pool).unwrap(), 60_000);
    // Claims track principal obligation, not custody.
    assert_eq!(kernel.total_claims(pool).unwrap(), 150_000);

    // The venue earns; the operator brings everything back.
    venue.accrue(usdc(), 10_000);
    let recalled = venue.recall(&usdc(), 100_000).unwrap();
    kernel.rebalance_in(pool, recalled, &alice).unwrap();
    assert_eq!(kernel.balance_minor(pool).unwrap(), 160_000);
    assert_eq!(kernel.yield_minor(pool).unwrap(), 10_000);

    // Skim operating funds from surplus: cap = floor(10000 * 50/10000) = 50.
    assert_eq!(
        kernel.skim(&operator, pool, 51),
        Err(KernelError::SkimExceedsLimit {
            requested_minor: 51,
            cap_minor: 50
        })
    );
    let gas = kernel.skim(&operator, pool, 50).unwrap();
    assert_eq!(gas.amount_minor(), 50);
    drop(gas);
    assert_eq!(kernel.balance_minor(pool).unwrap(), 159_950);

    // Flash round trip: borrow, deploy, recall with proceeds, settle — one
    // indivisible unit, no idle-capital window.
    kernel
        .execute(|unit| {
            let (loaned, receipt) = unit.borrow(&operator, pool, 50_000)?;
            venue.deploy(loaned);
            venue.accrue(usdc(), 500);
            let proceeds = venue
                .recall(&usdc(), 50_500)
                .ok_or(KernelError::LoanNotRepaid {
                    borrowed_minor: 50_000,
                    repaid_minor: 0,
                })?;
            unit.settle(pool, proceeds, receipt, venue.tag(), operator.holder())
        })
        .unwrap();
    assert_eq!(kernel.balance_minor(pool).unwrap(), 160_450);
    assert_eq!(kernel.total_claims(pool).unwrap(), 150_000);

    // Reasoning proof is retrievable off-chain via the recorded reference.
    let history = kernel.events().history(pool);
    let recorded_ref = history
        .iter()
        .find_map(|r| match &r.kind {
            coffer_audit::EventKind::EncryptedReasoningProofRecorded { blob_ref, .. } => {
                Some(blob_ref.clone())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(
        proofs.get(&recorded_ref).unwrap(),
        b"venue rate 4.1% vs idle 0%".to_vec()
    );

    // Replaying the log reproduces the live state.
    assert_eq!(
        kernel.events().replay(pool).unwrap(),
        kernel.snapshot(pool).unwrap()
    );

    // Full redemption: alice takes her proportional share, bob drains the
    // rest; surplus is distributed pro rata by the floor formula.
    let alice_out = kernel.withdraw(pool, 100_000, &alice).unwrap();
    assert_eq!(alice_out.amount_minor(), 106_966); // floor(100000 * 160450 / 150000)
    drop(alice_out);

    let bob_out = kernel.withdraw(pool, 50_000, &bob).unwrap();
    assert_eq!(bob_out.amount_minor(), 53_484); // everything that remains
    drop(bob_out);

    assert_eq!(kernel.balance_minor(pool).unwrap(), 0);
    assert_eq!(kernel.total_claims(pool).unwrap(), 0);
}
