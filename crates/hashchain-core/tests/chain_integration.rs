use hashchain_core::chain::Ledger;
use hashchain_core::{IntegrityError, Transaction};

#[test]
fn test_chain_lifecycle() -> anyhow::Result<()> {
    let mut ledger: Ledger<Transaction> = Ledger::new()?;
    let num_blocks = 100u64;
    // Grow the chain and check the link invariant at every step
    for i in 0..num_blocks {
        let prev_tip_hash = ledger.tip().hash;
        let block = ledger.append_at(
            Transaction {
                from: format!("addr_from_{}", i),
                to: format!("addr_to_{}", i),
                amount: i,
            },
            1_600_000_000 + i * 100,
        )?;
        assert_eq!(block.index, i + 1);
        assert_eq!(block.previous_hash, prev_tip_hash);
    }
    assert_eq!(ledger.len(), num_blocks as usize + 1);
    assert!(ledger.is_valid());

    // The dump is a faithful field-by-field JSON rendering
    let json = serde_json::to_string(&ledger)?;
    let restored: Ledger<Transaction> = serde_json::from_str(&json)?;
    assert_eq!(restored.len(), ledger.len());
    assert!(restored.is_valid());
    Ok(())
}

#[test]
fn test_tamper_detection_end_to_end() -> anyhow::Result<()> {
    let mut ledger: Ledger<Transaction> = Ledger::new()?;
    for i in 0..10u64 {
        ledger.append_at(
            Transaction {
                from: "alice".to_string(),
                to: "bob".to_string(),
                amount: i,
            },
            1_600_000_000 + i * 100,
        )?;
    }
    assert!(ledger.is_valid());

    // Inflate an old amount behind the ledger's back
    ledger.blocks[5].data.amount = 1_000_000;
    assert!(!ledger.is_valid());
    assert_eq!(
        ledger.verify(),
        Err(IntegrityError::HashMismatch { index: 5 })
    );

    // Restoring the original payload restores validity
    ledger.blocks[5].data.amount = 4;
    assert!(ledger.is_valid());
    Ok(())
}
