//! Variant resolution: a PGN number may be shared by several catalogue
//! definitions, disambiguated by fields carrying equality constraints.
//!
//! Catalogue order is load-bearing: candidates are tried in order and the
//! first full match wins, so more specific variants must precede the
//! range-wide fallback closing their block.
use crate::core::{FieldDescriptor, LookupHandle, PgnDescriptor};
use crate::error::DecodeError;
use crate::infra::codec::bits::extract;
use crate::infra::codec::engine::effective_bits;
use crate::protocol::catalog::Registry;

/// Select the definition matching `pgn` and the payload's match-field bytes.
/// The returned reference borrows from the catalogue.
pub fn resolve<'r>(
    registry: &'r Registry,
    pgn: u32,
    payload: &[u8],
) -> Result<&'r PgnDescriptor, DecodeError> {
    resolve_inner(registry, pgn, |field| {
        extract(
            payload,
            field.bit_offset as usize,
            effective_bits(registry, field),
            false,
            0,
        )
        .ok()
        .map(|extracted| extracted.raw)
    })
}

/// By-fields variant: match-field values arrive as (field name, label) pairs
/// instead of payload bytes. Labels are reverse-looked-up through the field's
/// table; plain integers are accepted as-is.
pub fn resolve_by_fields<'r>(
    registry: &'r Registry,
    pgn: u32,
    fields: &[(&str, &str)],
) -> Result<&'r PgnDescriptor, DecodeError> {
    resolve_inner(registry, pgn, |field| {
        let (_, supplied) = fields.iter().find(|(name, _)| *name == field.name)?;
        let reversed = match field.lookup_ref {
            Some(LookupHandle::Pair(table)) => table.reverse(supplied).map(i64::from),
            _ => None,
        };
        reversed.or_else(|| supplied.parse::<i64>().ok())
    })
}

fn resolve_inner<'r, F>(
    registry: &'r Registry,
    pgn: u32,
    mut value_of: F,
) -> Result<&'r PgnDescriptor, DecodeError>
where
    F: FnMut(&FieldDescriptor) -> Option<i64>,
{
    let pgns = registry.pgns();

    if let Some(mut index) = registry.first_index_of(pgn) {
        // A block that opens with its fallback holds nothing more specific;
        // the catch-all scan below will pick the fallback up again.
        if pgns[index].fallback {
            index += 1;
            if index >= pgns.len() || pgns[index].pgn != pgn {
                return catch_all(registry, pgn);
            }
        }

        if !pgns[index].has_match_fields {
            return Ok(&pgns[index]);
        }

        // Candidates are contiguous and tried in catalogue order.
        while index < pgns.len() && pgns[index].pgn == pgn {
            if candidate_matches(&pgns[index], &mut value_of) {
                return Ok(&pgns[index]);
            }
            index += 1;
        }
    }

    catch_all(registry, pgn)
}

/// A candidate matches when every match-constrained field equals its
/// constraint. A candidate with no constraints matches unconditionally.
fn candidate_matches<F>(def: &PgnDescriptor, value_of: &mut F) -> bool
where
    F: FnMut(&FieldDescriptor) -> Option<i64>,
{
    for field in def.active_fields() {
        let Some(expected) = field.match_constraint else {
            continue;
        };
        match value_of(field) {
            Some(value) if value == expected => {}
            _ => return false,
        }
    }
    true
}

/// The largest fallback definition at or below `pgn`: the range-wide
/// catch-all for unrecognised numbers.
fn catch_all(registry: &Registry, pgn: u32) -> Result<&PgnDescriptor, DecodeError> {
    let fallback = registry
        .pgns()
        .iter()
        .rev()
        .find(|def| def.fallback && def.pgn <= pgn);

    match fallback {
        Some(def) => Ok(def),
        None if registry.first_index_of(pgn).is_none() => Err(DecodeError::UnknownPgn { pgn }),
        None => Err(DecodeError::NoCatchAll { pgn }),
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
