pub mod ntt;

/// In-place transform over one residue channel. Implementations are shared
/// across the rayon pool, hence `Send + Sync`.
pub trait DFT<O>: Send + Sync {
    fn forward_inplace(&self, a: &mut [O]);
    fn forward_inplace_lazy(&self, a: &mut [O]);
    fn backward_inplace(&self, a: &mut [O]);
    fn backward_inplace_lazy(&self, a: &mut [O]);
}
