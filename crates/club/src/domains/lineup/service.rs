use rand::seq::IndexedRandom;
use rand::Rng;

use infra::models::{GameKind, Gender};

use crate::domains::courts::types::SessionPlayer;

// Combinations within this margin of the best quality count as ties and are
// picked between at random, so repeated recommendations vary.
const NEAR_TIE_MARGIN: f64 = 0.5;

/// Spread of a candidate lineup's strength, lower is more even. Population
/// standard deviation of the ranks plus half the max-min range, with the
/// range counted double on top once it spans three or more grade steps.
pub fn lineup_quality(ranks: &[u8]) -> f64 {
    if ranks.is_empty() {
        return 0.0;
    }
    let count = ranks.len() as f64;
    let mean = ranks.iter().map(|&rank| rank as f64).sum::<f64>() / count;
    let variance = ranks
        .iter()
        .map(|&rank| (rank as f64 - mean).powi(2))
        .sum::<f64>()
        / count;
    let std_dev = variance.sqrt();

    let max = ranks.iter().copied().max().unwrap_or(0);
    let min = ranks.iter().copied().min().unwrap_or(0);
    let range = (max - min) as f64;
    let extreme_penalty = if range >= 3.0 { range * 2.0 } else { 0.0 };

    std_dev + range * 0.5 + extreme_penalty
}

/// Suggest an evenly matched four from the pool. Mixed doubles picks the
/// men's pair and the women's pair independently and returns men first;
/// single-gender kinds pick the best four overall. The random source is the
/// caller's, which keeps recommendations reproducible under test.
pub fn recommend_lineup(
    kind: GameKind,
    pool: &[SessionPlayer],
    rng: &mut impl Rng,
) -> Result<Vec<SessionPlayer>, Box<dyn std::error::Error + Send + Sync>> {
    match kind {
        GameKind::MixedDoubles => {
            let males: Vec<&SessionPlayer> =
                pool.iter().filter(|p| p.gender == Gender::Male).collect();
            let females: Vec<&SessionPlayer> =
                pool.iter().filter(|p| p.gender == Gender::Female).collect();
            if males.len() < 2 || females.len() < 2 {
                return Err("Mixed doubles needs at least two men and two women".into());
            }
            let mut lineup = pick_pair(&males, rng);
            lineup.extend(pick_pair(&females, rng));
            Ok(lineup)
        }
        GameKind::MenDoubles | GameKind::WomenDoubles => {
            if pool.len() < 4 {
                let message = match kind {
                    GameKind::MenDoubles => "Men's doubles needs at least four available players",
                    _ => "Women's doubles needs at least four available players",
                };
                return Err(message.into());
            }
            if pool.len() == 4 {
                return Ok(pool.to_vec());
            }
            Ok(pick_four(pool, rng))
        }
    }
}

// --- Private helpers ---

/// Best two of the candidates. Exactly two is a forced choice.
fn pick_pair(candidates: &[&SessionPlayer], rng: &mut impl Rng) -> Vec<SessionPlayer> {
    if candidates.len() == 2 {
        return vec![candidates[0].clone(), candidates[1].clone()];
    }
    let mut combos = Vec::new();
    for i in 0..candidates.len() - 1 {
        for j in i + 1..candidates.len() {
            let quality = lineup_quality(&[candidates[i].rank(), candidates[j].rank()]);
            combos.push((quality, vec![i, j]));
        }
    }
    choose_near_best(combos, rng)
        .into_iter()
        .map(|index| candidates[index].clone())
        .collect()
}

/// Best four of the pool, all combinations considered.
fn pick_four(pool: &[SessionPlayer], rng: &mut impl Rng) -> Vec<SessionPlayer> {
    let mut combos = Vec::new();
    for i in 0..pool.len() - 3 {
        for j in i + 1..pool.len() - 2 {
            for k in j + 1..pool.len() - 1 {
                for l in k + 1..pool.len() {
                    let quality = lineup_quality(&[
                        pool[i].rank(),
                        pool[j].rank(),
                        pool[k].rank(),
                        pool[l].rank(),
                    ]);
                    combos.push((quality, vec![i, j, k, l]));
                }
            }
        }
    }
    choose_near_best(combos, rng)
        .into_iter()
        .map(|index| pool[index].clone())
        .collect()
}

/// Uniform pick among the combinations within the near-tie margin of the
/// best quality. The best combination always qualifies, so a non-empty
/// input always yields a choice.
fn choose_near_best(combos: Vec<(f64, Vec<usize>)>, rng: &mut impl Rng) -> Vec<usize> {
    let best = combos
        .iter()
        .map(|(quality, _)| *quality)
        .fold(f64::INFINITY, f64::min);
    let ties: Vec<(f64, Vec<usize>)> = combos
        .into_iter()
        .filter(|(quality, _)| (quality - best).abs() < NEAR_TIE_MARGIN)
        .collect();
    ties.choose(rng)
        .map(|(_, combo)| combo.clone())
        .unwrap_or_default()
}
