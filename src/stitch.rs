//! Joining segments that share endpoints into one continuous chain.

use log::debug;

use crate::network::{Coordinate, Polyline};

/// Which end of a candidate touches which end of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Join {
    /// Candidate's first point is the chain's first point.
    FirstToFirst,
    /// Candidate's first point is the chain's last point.
    FirstToLast,
    /// Candidate's last point is the chain's first point.
    LastToFirst,
    /// Candidate's last point is the chain's last point.
    LastToLast,
}

fn find_join(chain: &[Coordinate], candidate: &Polyline) -> Option<Join> {
    let (head, tail) = (chain[0], chain[chain.len() - 1]);
    let (first, last) = (candidate.first(), candidate.last());

    if first == head {
        Some(Join::FirstToFirst)
    } else if first == tail {
        Some(Join::FirstToLast)
    } else if last == head {
        Some(Join::LastToFirst)
    } else if last == tail {
        Some(Join::LastToLast)
    } else {
        None
    }
}

/// Splice `candidate` onto the chain. The shared point appears once.
fn splice(chain: &mut Vec<Coordinate>, candidate: &[Coordinate], join: Join) {
    let n = candidate.len();
    match join {
        Join::FirstToFirst => {
            chain.splice(0..0, candidate[1..].iter().rev().copied());
        }
        Join::FirstToLast => {
            chain.extend_from_slice(&candidate[1..]);
        }
        Join::LastToFirst => {
            chain.splice(0..0, candidate[..n - 1].iter().copied());
        }
        Join::LastToLast => {
            chain.extend(candidate[..n - 1].iter().rev().copied());
        }
    }
}

/// Stitch every polyline reachable from `seed` through shared endpoints.
///
/// The chain starts as the seed's coordinates. Passes over the remaining
/// pool are repeated until one makes no change; candidates are reversed
/// as needed so the shared point sits at the join. The seed itself is
/// skipped if present in `pool`. Polylines not connected to the seed are
/// left out.
pub fn stitch<'a, I>(seed: &Polyline, pool: I) -> Vec<Coordinate>
where
    I: IntoIterator<Item = &'a Polyline>,
{
    let mut chain = seed.coords().to_vec();
    let mut remaining: Vec<&Polyline> = pool
        .into_iter()
        .filter(|p| p.key() != seed.key())
        .collect();

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        let mut i = 0;

        while i < remaining.len() {
            match find_join(&chain, remaining[i]) {
                Some(join) => {
                    let candidate = remaining.remove(i);
                    splice(&mut chain, candidate.coords(), join);
                    changed = true;
                }
                None => i += 1,
            }
        }

        if !changed {
            break;
        }
    }

    debug!(
        "Stitched from segment {} in {passes} passes: {} points, {} segments unconnected",
        seed.id(),
        chain.len(),
        remaining.len()
    );

    chain
}
