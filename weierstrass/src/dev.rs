//! Development-related functionality.

/// Implement group law, conversion and scalar multiplication tests for one coordinate system.
///
/// Invoke inside a test module of a crate with `rand_chacha` as a dev-dependency:
///
/// ```ignore
/// weierstrass::impl_group_law_tests!(
///     point: ProjectivePoint<P256>,
///     affine: AffinePoint<P256>,
///     field: FieldElement,
///     scalar: Scalar,
///     order: ORDER_LIMBS
/// );
/// ```
///
/// `order` is the little-endian limbs of the prime subgroup order.
#[macro_export]
macro_rules! impl_group_law_tests {
    (
        point: $point:ty,
        affine: $affine:ty,
        field: $field:ty,
        scalar: $scalar:ty,
        order: $order:expr
    ) => {
        use $crate::{
            CanonicalLimbs as _,
            ff::Field as _,
            group::{Curve as _, Group as _},
            scalarmul::{Vartime, Word},
        };

        const WINDOWS: [usize; 5] = [2, 3, 5, 8, 13];

        fn rng(seed: u64) -> rand_chacha::ChaCha8Rng {
            <rand_chacha::ChaCha8Rng as rand_chacha::rand_core::SeedableRng>::seed_from_u64(seed)
        }

        /// Random subgroup element with a random representative.
        fn random_point(rng: &mut rand_chacha::ChaCha8Rng) -> $point {
            let point = <$point as $crate::group::Group>::random(&mut *rng);
            point.rescale(&<$field as $crate::ff::Field>::random(&mut *rng))
        }

        fn plus_one(limbs: &[Word]) -> Vec<Word> {
            let mut out = limbs.to_vec();
            let mut carry = true;
            for w in out.iter_mut() {
                if !carry {
                    break;
                }
                let (sum, c) = w.overflowing_add(1);
                *w = sum;
                carry = c;
            }
            if carry {
                out.push(1);
            }
            out
        }

        /// Uniform, high Hamming weight and long runs of equal bits.
        fn scalar_strategies(rng: &mut rand_chacha::ChaCha8Rng) -> [Vec<Word>; 3] {
            use rand_chacha::rand_core::RngCore;

            let k = <$scalar as $crate::ff::Field>::random(&mut *rng);
            let uniform: Vec<Word> = AsRef::<[Word]>::as_ref(&k.canonical_limbs()).to_vec();
            let dense = uniform.iter().map(|w| w | 0x7777_7777_7777_7777).collect();

            let bits = uniform.len() * 64;
            let mut runs = vec![0; uniform.len()];
            let mut bit = 0;
            while bit < bits {
                let run = 1 + (rng.next_u32() % 32) as usize;
                if rng.next_u32() & 1 == 1 {
                    for i in bit..(bit + run).min(bits) {
                        runs[i / 64] |= 1 << (i % 64);
                    }
                }
                bit += run;
            }

            [uniform, dense, runs]
        }

        #[test]
        fn identity_laws() {
            let mut rng = rng(1);
            let identity = <$point>::IDENTITY;
            assert!(bool::from(identity.is_identity()));
            assert!(bool::from(identity.is_on_curve()));
            assert_eq!(identity.double(), identity);
            assert_eq!(identity + identity, identity);
            assert!(bool::from(identity.to_affine().is_identity()));

            for _ in 0..8 {
                let p = random_point(&mut rng);
                assert!(bool::from(p.is_on_curve()));
                assert_eq!(p + identity, p);
                assert_eq!(identity + p, p);
                assert_eq!(p - p, identity);
                assert_eq!(p + (-p), identity);
                assert_eq!(-(-p), p);
                assert_eq!(identity.add_mixed(&p.to_affine()), p);
                assert_eq!(p.add_mixed(&<$affine>::IDENTITY), p);
                assert_eq!(p.add_mixed(&(-p).to_affine()), identity);
            }
        }

        #[test]
        fn equality_ignores_representative() {
            let mut rng = rng(2);
            let p = random_point(&mut rng);
            let q = p.rescale(&<$field as $crate::ff::Field>::random(&mut rng));
            assert_eq!(p, q);
            assert_ne!(p, q.double());
            assert_ne!(p, <$point>::IDENTITY);
            assert_eq!(p.to_affine(), q.to_affine());
        }

        #[test]
        fn affine_round_trip() {
            let mut rng = rng(3);
            assert_eq!(<$point>::GENERATOR.to_affine(), <$affine>::GENERATOR);
            assert_eq!(<$point>::from(<$affine>::GENERATOR), <$point>::GENERATOR);
            assert_eq!(<$point>::from(<$affine>::IDENTITY), <$point>::IDENTITY);

            for _ in 0..8 {
                let p = random_point(&mut rng);
                let affine = p.to_affine();
                assert!(bool::from(affine.is_on_curve()));
                assert_eq!(<$point>::from(affine), p);
                assert_eq!((-p).to_affine(), -affine);
            }
        }

        #[test]
        fn double_matches_add() {
            let mut rng = rng(4);
            for _ in 0..8 {
                let p = random_point(&mut rng);
                assert_eq!(p.double(), p + p);
                assert_eq!(p.double(), p.add_mixed(&p.to_affine()));
                assert_eq!(p.double() - p, p);
            }
        }

        #[test]
        fn associativity() {
            let mut rng = rng(5);
            for _ in 0..8 {
                let p = random_point(&mut rng);
                let q = random_point(&mut rng);
                let r = random_point(&mut rng);

                let expected = (p + q) + r;
                let groupings = [
                    p + (q + r),
                    (p + r) + q,
                    (q + r) + p,
                    (r + p) + q,
                    q + (r + p),
                    p.add_mixed(&q.to_affine()) + r,
                    (p + r).add_mixed(&q.to_affine()),
                ];
                for sum in groupings {
                    assert_eq!(sum, expected);
                }
                assert_eq!(p + q, q + p);
            }
        }

        #[test]
        fn mixed_addition_matches_full() {
            let mut rng = rng(6);
            for _ in 0..16 {
                let p = random_point(&mut rng);
                let q = random_point(&mut rng);
                assert_eq!(p.add_mixed(&q.to_affine()), p + q);
                assert_eq!(p.sub_mixed(&q.to_affine()), p - q);
                assert_eq!(p + q.to_affine(), p + q);
            }
        }

        #[test]
        fn batch_normalize_matches_to_affine() {
            let mut rng = rng(7);
            let step = random_point(&mut rng);

            for n in [0usize, 1, 2, 8, 16, 1024, 16384] {
                let mut points: Vec<$point> = Vec::with_capacity(n);
                let mut acc = random_point(&mut rng);
                for i in 0..n {
                    acc += step;
                    points.push(match i % 7 {
                        3 => <$point>::IDENTITY,
                        5 => -points[i - 1],
                        6 => points[i - 1] + points[i - 2],
                        _ => acc,
                    });
                }

                let mut affine = vec![<$affine>::IDENTITY; n];
                <$point as $crate::group::Curve>::batch_normalize(&points, &mut affine);
                for (point, affine) in points.iter().zip(&affine) {
                    assert_eq!(point.to_affine(), *affine);
                }
            }
        }

        #[test]
        fn scalar_boundaries() {
            let mut rng = rng(8);
            let p = random_point(&mut rng);
            let identity = <$point>::IDENTITY;
            let one = <$scalar as $crate::ff::Field>::ONE;

            assert_eq!(p * <$scalar as $crate::ff::Field>::ZERO, identity);
            assert_eq!(p * one, p);
            assert_eq!(p * (one + one), p.double());
            assert_eq!(p * -one, -p);

            let order: &[Word] = &$order;
            let order_plus_one = plus_one(order);
            let cases: [(&[Word], $point); 5] = [
                (&[0], identity),
                (&[1], p),
                (&[2], p.double()),
                (order, identity),
                (&order_plus_one, p),
            ];

            for (limbs, expected) in cases {
                let k = Vartime::new(limbs);
                assert_eq!($crate::scalarmul::mul_double_and_add_vartime(&p, k), expected);
                assert_eq!($crate::scalarmul::mul_naf_vartime(&p, k), expected);
                assert_eq!(p.mul_vartime(k), expected);
                for window in WINDOWS {
                    assert_eq!($crate::scalarmul::mul_wnaf_vartime(&p, k, window), expected);
                }
            }
        }

        #[test]
        fn scalar_mul_algorithms_agree() {
            for seed in 0..4 {
                let mut rng = rng(100 + seed);
                let p = random_point(&mut rng);
                let fresh = <$point>::from(p.to_affine());

                let k = <$scalar as $crate::ff::Field>::random(&mut rng);
                let limbs = k.canonical_limbs();
                let expected = $crate::scalarmul::mul_double_and_add_vartime(
                    &p,
                    Vartime::new(AsRef::<[Word]>::as_ref(&limbs)),
                );
                assert_eq!(p * k, expected);
                assert_eq!($crate::scalarmul::mul_double_and_add(&p, &k), expected);

                for limbs in scalar_strategies(&mut rng) {
                    let k = Vartime::new(limbs.as_slice());
                    let expected = $crate::scalarmul::mul_double_and_add_vartime(&p, k);
                    assert_eq!($crate::scalarmul::mul_naf_vartime(&p, k), expected);
                    assert_eq!(p.mul_vartime(k), expected);
                    assert_eq!(fresh.mul_vartime(k), expected);
                    for window in WINDOWS {
                        assert_eq!($crate::scalarmul::mul_wnaf_vartime(&p, k, window), expected);
                        assert_eq!($crate::scalarmul::mul_wnaf_vartime(&fresh, k, window), expected);
                    }
                }
            }
        }

        #[test]
        fn scalar_mul_distributes() {
            let mut rng = rng(9);
            let p = random_point(&mut rng);
            let q = random_point(&mut rng);
            let a = <$scalar as $crate::ff::Field>::random(&mut rng);
            let b = <$scalar as $crate::ff::Field>::random(&mut rng);

            assert_eq!((p + q) * a, p * a + q * a);
            assert_eq!(p * (a + b), p * a + p * b);
            assert_eq!(p * (a * b), (p * a) * b);
        }
    };
}
