use crate::dft::DFT;
use crate::error::Result;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::barrett::Barrett;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::{BARRETT, NONE, ONCE};
use itertools::izip;

/// Negacyclic NTT of length nth_root/2 modulo a word prime: evaluation at the
/// odd powers of a primitive nth_root-th root of unity psi, twiddles stored
/// in bit-reversed order.
pub struct Table<O> {
    prime: Prime<O>,
    psi: O,
    psi_forward_rev: Vec<Barrett<u64>>,
    psi_backward_rev: Vec<Barrett<u64>>,
    n_inv: Barrett<u64>,
    psi_n_inv: Barrett<u64>,
    q: O,
    two_q: O,
    four_q: O,
}

impl Table<u64> {
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Result<Table<u64>> {
        debug_assert!(
            nth_root >= 4 && nth_root & (nth_root - 1) == 0,
            "invalid argument: nth_root = {} is not a power of two >= 4",
            nth_root
        );

        let psi: u64 = prime.primitive_nth_root(nth_root)?;

        let psi_mont: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(psi);
        let psi_inv_mont: Montgomery<u64> = prime.montgomery.pow(psi_mont, prime.phi - 1);

        let half: usize = (nth_root >> 1) as usize;

        let mut psi_forward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); half];
        let mut psi_backward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); half];

        psi_forward_rev[0] = prime.barrett.prepare(1);
        psi_backward_rev[0] = prime.barrett.prepare(1);

        let log_nth_root_half: u32 = half.trailing_zeros();

        let mut powers_forward: u64 = 1u64;
        let mut powers_backward: u64 = 1u64;

        for i in 1..half {
            let i_rev: usize = i.reverse_bits_msb(log_nth_root_half);

            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_mont, &mut powers_forward);
            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_inv_mont, &mut powers_backward);

            psi_forward_rev[i_rev] = prime.barrett.prepare(powers_forward);
            psi_backward_rev[i_rev] = prime.barrett.prepare(powers_backward);
        }

        let n_inv: Barrett<u64> = prime.barrett.prepare(prime.inv(half as u64));
        let psi_n_inv: Barrett<u64> = prime.barrett.prepare(
            prime
                .barrett
                .mul_external::<ONCE>(n_inv, psi_backward_rev[1].0),
        );

        let q: u64 = prime.q();

        Ok(Self {
            prime,
            psi,
            psi_forward_rev,
            psi_backward_rev,
            n_inv,
            psi_n_inv,
            q,
            two_q: q << 1,
            four_q: q << 2,
        })
    }

    pub fn psi(&self) -> u64 {
        self.psi
    }

    /// Transform length.
    pub fn n(&self) -> usize {
        self.psi_forward_rev.len()
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward_inplace::<false>(a)
    }

    fn forward_inplace_lazy(&self, a: &mut [u64]) {
        self.forward_inplace::<true>(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward_inplace::<false>(a)
    }

    fn backward_inplace_lazy(&self, a: &mut [u64]) {
        self.backward_inplace::<true>(a)
    }
}

impl Table<u64> {
    /// Cooley-Tukey forward transform. Inputs in [0, 4q-1]; outputs in
    /// [0, q-1], or [0, 2q-1] if LAZY.
    pub fn forward_inplace<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        debug_assert!(
            n == self.n(),
            "invalid a.len()={} != table size {}",
            n,
            self.n()
        );
        let log_n: u32 = n.trailing_zeros();

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == log_n - 1 {
                if LAZY {
                    izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(
                        |(a, psi)| {
                            let (a, b) = a.split_at_mut(size);
                            self.dit_inplace::<false>(&mut a[0], &mut b[0], *psi);
                            debug_assert!(a[0] < self.two_q, "forward output {} > 2q-1", a[0]);
                            debug_assert!(b[0] < self.two_q, "forward output {} > 2q-1", b[0]);
                        },
                    );
                } else {
                    izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(
                        |(a, psi)| {
                            let (a, b) = a.split_at_mut(size);
                            self.dit_inplace::<true>(&mut a[0], &mut b[0], *psi);
                            self.prime.barrett.reduce_assign::<BARRETT>(&mut a[0]);
                            self.prime.barrett.reduce_assign::<BARRETT>(&mut b[0]);
                            debug_assert!(a[0] < self.q, "forward output {} > q-1", a[0]);
                            debug_assert!(b[0] < self.q, "forward output {} > q-1", b[0]);
                        },
                    );
                }
            } else if t >= 16 {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dit_inplace::<true>(&mut a[0], &mut b[0], *psi);
                        self.dit_inplace::<true>(&mut a[1], &mut b[1], *psi);
                        self.dit_inplace::<true>(&mut a[2], &mut b[2], *psi);
                        self.dit_inplace::<true>(&mut a[3], &mut b[3], *psi);
                        self.dit_inplace::<true>(&mut a[4], &mut b[4], *psi);
                        self.dit_inplace::<true>(&mut a[5], &mut b[5], *psi);
                        self.dit_inplace::<true>(&mut a[6], &mut b[6], *psi);
                        self.dit_inplace::<true>(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dit_inplace::<true>(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dit_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.four_q, "a:{} q:{}", a, self.four_q);
        debug_assert!(*b < self.four_q, "b:{} q:{}", b, self.four_q);
        a.reduce_once_assign(self.two_q);
        let bt: u64 = self.prime.barrett.mul_external::<NONE>(t, *b);
        *b = *a + self.two_q - bt;
        *a += bt;
        if !LAZY {
            a.reduce_once_assign(self.two_q);
            b.reduce_once_assign(self.two_q);
        }
    }

    /// Gentleman-Sande backward transform, scaled by n^-1. Inputs in
    /// [0, 2q-1]; outputs in [0, q-1], or [0, 2q-1] if LAZY.
    pub fn backward_inplace<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        debug_assert!(
            n == self.n(),
            "invalid a.len()={} != table size {}",
            n,
            self.n()
        );
        let log_n: u32 = n.trailing_zeros();

        for layer in (0..log_n).rev() {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == 0 {
                let (a, b) = a.split_at_mut(size);
                if size >= 8 {
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dif_last_inplace::<LAZY>(&mut a[0], &mut b[0]);
                        self.dif_last_inplace::<LAZY>(&mut a[1], &mut b[1]);
                        self.dif_last_inplace::<LAZY>(&mut a[2], &mut b[2]);
                        self.dif_last_inplace::<LAZY>(&mut a[3], &mut b[3]);
                        self.dif_last_inplace::<LAZY>(&mut a[4], &mut b[4]);
                        self.dif_last_inplace::<LAZY>(&mut a[5], &mut b[5]);
                        self.dif_last_inplace::<LAZY>(&mut a[6], &mut b[6]);
                        self.dif_last_inplace::<LAZY>(&mut a[7], &mut b[7]);
                    });
                } else {
                    izip!(a, b).for_each(|(a, b)| self.dif_last_inplace::<LAZY>(a, b));
                }
            } else if t >= 16 {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dif_inplace::<true>(&mut a[0], &mut b[0], *psi);
                        self.dif_inplace::<true>(&mut a[1], &mut b[1], *psi);
                        self.dif_inplace::<true>(&mut a[2], &mut b[2], *psi);
                        self.dif_inplace::<true>(&mut a[3], &mut b[3], *psi);
                        self.dif_inplace::<true>(&mut a[4], &mut b[4], *psi);
                        self.dif_inplace::<true>(&mut a[5], &mut b[5], *psi);
                        self.dif_inplace::<true>(&mut a[6], &mut b[6], *psi);
                        self.dif_inplace::<true>(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_inplace::<true>(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dif_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.two_q, "a:{} q:{}", a, self.two_q);
        debug_assert!(*b < self.two_q, "b:{} q:{}", b, self.two_q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external::<NONE>(t, *a + self.two_q - *b);
        *a += *b;
        a.reduce_once_assign(self.two_q);
        *b = d;
        if !LAZY {
            a.reduce_once_assign(self.q);
            b.reduce_once_assign(self.q);
        }
    }

    #[inline(always)]
    fn dif_last_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64) {
        debug_assert!(*a < self.two_q);
        debug_assert!(*b < self.two_q);
        if LAZY {
            let d: u64 = self
                .prime
                .barrett
                .mul_external::<NONE>(self.psi_n_inv, *a + self.two_q - *b);
            *a = self.prime.barrett.mul_external::<NONE>(self.n_inv, *a + *b);
            *b = d;
        } else {
            let d: u64 = self
                .prime
                .barrett
                .mul_external::<ONCE>(self.psi_n_inv, *a + self.two_q - *b);
            *a = self.prime.barrett.mul_external::<ONCE>(self.n_inv, *a + *b);
            *b = d;
        }
    }
}
