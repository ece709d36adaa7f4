//! `.npz` export of a wakefield run.

use crate::driver::WakefieldResult;
use ndarray::{Array1, ArrayBase, Data, Dimension};
use ndarray_npy::{NpzWriter, WritableElement};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use wake_types::error::{WakeError, WakeResult};

fn add<W, S, D>(npz: &mut NpzWriter<W>, key: &str, array: &ArrayBase<S, D>) -> WakeResult<()>
where
    W: Write + Seek,
    S: Data,
    S::Elem: WritableElement,
    D: Dimension,
{
    npz.add_array(key, array)
        .map_err(|e| WakeError::Npz(format!("Failed to write {key} to npz: {e}")))
}

/// Write every mesh, the deposition grids and the axes of `result` to
/// `path`. Keys match the field names (`psi`, `plasma_density`, ...);
/// `valid_slices` holds `[start, end)`.
pub fn write_npz(result: &WakefieldResult, path: impl AsRef<Path>) -> WakeResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut npz = NpzWriter::new(file);

    add(&mut npz, "plasma_density", &result.derived.plasma_density)?;
    add(&mut npz, "dr_psi", &result.mesh.dr_psi)?;
    add(&mut npz, "dxi_psi", &result.mesh.dxi_psi)?;
    add(&mut npz, "e_z_p", &result.derived.e_z_p)?;
    add(&mut npz, "k_r", &result.derived.k_r)?;
    add(&mut npz, "psi", &result.mesh.psi)?;
    add(&mut npz, "e_r", &result.derived.e_r)?;
    add(&mut npz, "b_theta_bar", &result.mesh.b_theta_bar)?;
    add(&mut npz, "b_theta_0", &result.mesh.b_theta_0)?;
    add(&mut npz, "charge", &result.charge)?;
    add(&mut npz, "susceptibility", &result.susceptibility)?;
    add(&mut npz, "r_arr", &result.grid.r_arr)?;
    add(&mut npz, "xi_arr", &result.grid.xi_arr)?;
    let valid = Array1::from(vec![
        result.valid_slices.start as u64,
        result.valid_slices.end as u64,
    ]);
    add(&mut npz, "valid_slices", &valid)?;

    npz.finish()
        .map_err(|e| WakeError::Npz(format!("Failed to finish npz '{}': {e}", path.display())))?;
    Ok(())
}
