//! 結合テスト: 持ち時間つきの対局が終局まで進むことを確認する。

/// 統合テスト本体。
#[cfg(test)]
mod tests {
    use core::time::Duration;

    use isolation_core::ai::types::Ai;
    use isolation_core::ai::{self, CancelToken};
    use isolation_core::{arena, engine};

    /// テスト出力へ JSON ログを流す（複数回呼ばれても最初の1回だけ有効）。
    fn init_tracing() {
        let installed = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        if installed.is_err() {
            // 他のテストが先に設定済み。
        }
    }

    /// 記録の手順を初期局面から再生し、終局図と一致することを確認する。
    fn assert_replays(record: &arena::MatchRecord) {
        let mut position = engine::Position::initial();
        for (ply, cell) in record.history().iter().enumerate() {
            position = position
                .apply_move(*cell)
                .unwrap_or_else(|err| panic!("ply {ply}: {cell} must be legal, got={err:?}"));
        }
        assert_eq!(position, record.position());
    }

    /// 指定手数だけランダムに進めた局面を返す。
    fn random_position(seed: u64, plies: u32) -> engine::Position {
        let mut agent = ai::random::Agent::new(seed);
        let mut position = engine::Position::initial();
        for _ply in u32::MIN..plies {
            let Some(cell) = agent.choose(&position) else {
                break;
            };
            position = position
                .apply_move(cell)
                .unwrap_or_else(|err| panic!("random move must be legal, got={err:?}"));
            if position.terminal_test() {
                break;
            }
        }
        position
    }

    /// `alphabeta vs random` が反則なく終局する。
    #[test]
    fn alphabeta_vs_random_finishes() {
        init_tracing();

        for seed in [0_u64, 42] {
            let mut first = ai::alphabeta::Agent::new(engine::Player::First, seed);
            let mut second = ai::random::Agent::new(seed.wrapping_add(1));
            let config = arena::MatchConfig::new(Duration::from_secs(2));
            let record = arena::play_match(&mut first, &mut second, config);

            assert_eq!(
                record.outcome(),
                arena::Outcome::Isolated,
                "seed={seed}, record={record:?}"
            );
            assert_eq!(record.position().winner(), Some(record.winner()));
            assert_replays(&record);
        }
    }

    /// `random vs alphabeta`（後手が探索側）も反則なく終局する。
    #[test]
    fn random_vs_alphabeta_finishes() {
        init_tracing();

        let mut first = ai::random::Agent::new(7);
        let mut second = ai::alphabeta::Agent::new(engine::Player::Second, 8).with_depth(2);
        let config = arena::MatchConfig::new(Duration::from_secs(2));
        let record = arena::play_match(&mut first, &mut second, config);

        assert_eq!(record.outcome(), arena::Outcome::Isolated, "record={record:?}");
        assert_replays(&record);
    }

    /// 様々な局面で、探索が返す手は常に合法手。
    #[test]
    fn alphabeta_selects_legal_moves() {
        for seed in 0_u64..8 {
            let position = random_position(seed, 4_u32.wrapping_add(u32::try_from(seed).unwrap_or(0)));
            if position.terminal_test() {
                continue;
            }
            let player = position.player();
            let got = ai::alphabeta::choose_move(&position, player, 3)
                .unwrap_or_else(|abort| panic!("seed={seed}: search must finish, got={abort:?}"));
            let cell = got.unwrap_or_else(|| panic!("seed={seed}: a move must be chosen"));
            assert!(
                position.actions().contains(&cell),
                "seed={seed}: {cell} must be legal in\n{position}"
            );
        }
    }

    /// 同じ種・同じ局面なら渡される手の列も同じ。
    #[test]
    fn alphabeta_agent_is_deterministic() {
        let position = engine::Position::initial();
        let run = || {
            let mut agent = ai::alphabeta::Agent::new(engine::Player::First, 31).with_depth(2);
            let mut sink: Vec<engine::Cell> = Vec::new();
            agent.get_action(&position, &mut sink, &CancelToken::new());
            sink
        };

        let first_run = run();
        assert_eq!(first_run.len(), 2, "opening move then searched move");
        assert_eq!(first_run, run());
    }
}
