// crates/mg_physics/src/boundary.rs

//! 边界应用（C8）
//!
//! 对每个激活方向的两侧施加策略：
//!
//! - **periodic**: 鬼层复制活动域对侧的镜像单元；
//! - **outflow**: 鬼层复制最近的活动层（零梯度）。参考索引取
//!   首/末个活动单元（低侧 `nghost`，高侧 `nghost + np_int − 1`）；
//! - **userdef**: 委托给 Setup 钩子。
//!
//! 交错场只写横向分量——鬼区的法向交错分量在这里绝不触碰，
//! 留给随后的法向面外推（C7）按 ∇·B = 0 恢复；因此边界扫掠
//! 必须以 C7 收尾，胞心磁场也在其后统一重建。

use mg_config::{BoundaryPolicy, BoundarySide};
use mg_runtime::{par_for_4d, Real};

use crate::data::DataBlock;
use crate::error::{PhysicsError, PhysicsResult};
use crate::grid::Direction;
use crate::reconcile::{reconstruct_normal_field, reconstruct_vc_field};
use crate::setup::Setup;
use crate::vars::NVAR;

/// 应用全部边界并收尾重建
pub fn set_boundary(data: &mut DataBlock, setup: &mut dyn Setup, t: Real) -> PhysicsResult<()> {
    let dims = data.grid.dimensions;
    let np_tot = data.grid.np_tot;
    let np_int = data.grid.np_int;
    let nghost = data.grid.nghost;

    for dir in 0..dims {
        let koffset = if dir == 2 { np_int[2] } else { 0 };
        let joffset = if dir == 1 { np_int[1] } else { 0 };
        let ioffset = if dir == 0 { np_int[0] } else { 0 };

        // 低侧
        let kend = if dir == 2 { nghost[2] } else { np_tot[2] };
        let jend = if dir == 1 { nghost[1] } else { np_tot[1] };
        let iend = if dir == 0 { nghost[0] } else { np_tot[0] };

        let lpolicy = data.lbound[dir];
        match lpolicy {
            BoundaryPolicy::Periodic => {
                let vc = data.vc.view();
                par_for_4d(data.exec, 0..NVAR, 0..kend, 0..jend, 0..iend, |n, k, j, i| {
                    vc.set(n, k, j, i, vc.get(n, k + koffset, j + joffset, i + ioffset));
                });
                let vs = data.vs.view();
                par_for_4d(data.exec, 0..dims, 0..kend, 0..jend, 0..iend, |n, k, j, i| {
                    // 法向分量不触碰
                    if n != dir {
                        vs.set(n, k, j, i, vs.get(n, k + koffset, j + joffset, i + ioffset));
                    }
                });
            }
            BoundaryPolicy::Outflow => {
                let vc = data.vc.view();
                par_for_4d(data.exec, 0..NVAR, 0..kend, 0..jend, 0..iend, |n, k, j, i| {
                    let kref = if dir == 2 { nghost[2] } else { k };
                    let jref = if dir == 1 { nghost[1] } else { j };
                    let iref = if dir == 0 { nghost[0] } else { i };
                    vc.set(n, k, j, i, vc.get(n, kref, jref, iref));
                });
                let vs = data.vs.view();
                par_for_4d(data.exec, 0..dims, 0..kend, 0..jend, 0..iend, |n, k, j, i| {
                    let kref = if dir == 2 { nghost[2] } else { k };
                    let jref = if dir == 1 { nghost[1] } else { j };
                    let iref = if dir == 0 { nghost[0] } else { i };
                    if n != dir {
                        vs.set(n, k, j, i, vs.get(n, kref, jref, iref));
                    }
                });
            }
            BoundaryPolicy::Userdef => {
                setup.userdef_boundary(data, Direction::from_idx(dir), BoundarySide::Beg, t)?;
            }
        }

        // 高侧
        let kbeg = if dir == 2 { koffset + nghost[2] } else { 0 };
        let jbeg = if dir == 1 { joffset + nghost[1] } else { 0 };
        let ibeg = if dir == 0 { ioffset + nghost[0] } else { 0 };

        let rpolicy = data.rbound[dir];
        match rpolicy {
            BoundaryPolicy::Periodic => {
                let vc = data.vc.view();
                par_for_4d(
                    data.exec,
                    0..NVAR,
                    kbeg..np_tot[2],
                    jbeg..np_tot[1],
                    ibeg..np_tot[0],
                    |n, k, j, i| {
                        vc.set(n, k, j, i, vc.get(n, k - koffset, j - joffset, i - ioffset));
                    },
                );
                let vs = data.vs.view();
                par_for_4d(
                    data.exec,
                    0..dims,
                    kbeg..np_tot[2],
                    jbeg..np_tot[1],
                    ibeg..np_tot[0],
                    |n, k, j, i| {
                        if n != dir {
                            vs.set(n, k, j, i, vs.get(n, k - koffset, j - joffset, i - ioffset));
                        }
                    },
                );
            }
            BoundaryPolicy::Outflow => {
                let vc = data.vc.view();
                par_for_4d(
                    data.exec,
                    0..NVAR,
                    kbeg..np_tot[2],
                    jbeg..np_tot[1],
                    ibeg..np_tot[0],
                    |n, k, j, i| {
                        let kref = if dir == 2 { nghost[2] + koffset - 1 } else { k };
                        let jref = if dir == 1 { nghost[1] + joffset - 1 } else { j };
                        let iref = if dir == 0 { nghost[0] + ioffset - 1 } else { i };
                        vc.set(n, k, j, i, vc.get(n, kref, jref, iref));
                    },
                );
                let vs = data.vs.view();
                par_for_4d(
                    data.exec,
                    0..dims,
                    kbeg..np_tot[2],
                    jbeg..np_tot[1],
                    ibeg..np_tot[0],
                    |n, k, j, i| {
                        let kref = if dir == 2 { nghost[2] + koffset - 1 } else { k };
                        let jref = if dir == 1 { nghost[1] + joffset - 1 } else { j };
                        let iref = if dir == 0 { nghost[0] + ioffset - 1 } else { i };
                        if n != dir {
                            vs.set(n, k, j, i, vs.get(n, kref, jref, iref));
                        }
                    },
                );
            }
            BoundaryPolicy::Userdef => {
                setup.userdef_boundary(data, Direction::from_idx(dir), BoundarySide::End, t)?;
            }
        }
    }

    // 法向交错分量外推，随后重建胞心磁场
    reconstruct_normal_field(data);
    reconstruct_vc_field(data);
    Ok(())
}

/// 启动期校验：userdef 策略必须有对应的 Setup 钩子
pub fn validate_boundary_support(data: &DataBlock, setup: &dyn Setup) -> PhysicsResult<()> {
    for dir in 0..data.grid.dimensions {
        for (side, policy) in [("beg", data.lbound[dir]), ("end", data.rbound[dir])] {
            if policy == BoundaryPolicy::Userdef && !setup.provides_userdef() {
                return Err(PhysicsError::UnsupportedBoundary {
                    policy: policy.to_string(),
                    dir,
                    side,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Setup;
    use crate::vars::*;
    use mg_config::{BoundaryConfig, SolverConfig};

    struct NoopSetup;
    impl Setup for NoopSetup {
        fn init_flow(&mut self, _data: &mut DataBlock) {}
    }

    fn block_1d(policy: BoundaryPolicy) -> DataBlock {
        let mut config = SolverConfig::default();
        config.grid.n = [8, 1, 1];
        config.grid.end = [8.0, 1.0, 1.0];
        config.boundary = BoundaryConfig::uniform(policy);
        DataBlock::new(&config).unwrap()
    }

    fn fill_ramp(data: &mut DataBlock) {
        let ni = data.grid.np_tot[0];
        for i in 0..ni {
            data.vc.set(RHO, 0, 0, i, i as Real + 100.0);
        }
        for i in 0..=ni {
            data.vs.set(0, 0, 0, i, 1.0);
        }
    }

    #[test]
    fn test_periodic_ghosts() {
        let mut data = block_1d(BoundaryPolicy::Periodic);
        fill_ramp(&mut data);
        set_boundary(&mut data, &mut NoopSetup, 0.0).unwrap();
        let n = data.grid.np_int[0];
        // 左鬼层取对侧活动单元
        assert_eq!(data.vc.get(RHO, 0, 0, 0), (n as Real) + 100.0);
        assert_eq!(data.vc.get(RHO, 0, 0, 1), (n + 1) as Real + 100.0);
        // 右鬼层
        assert_eq!(data.vc.get(RHO, 0, 0, n + 2), 102.0);
    }

    #[test]
    fn test_outflow_ghosts_zero_gradient() {
        let mut data = block_1d(BoundaryPolicy::Outflow);
        fill_ramp(&mut data);
        set_boundary(&mut data, &mut NoopSetup, 0.0).unwrap();
        let (beg, end) = (data.grid.beg[0], data.grid.end[0]);
        // 鬼层等于首/末活动单元
        assert_eq!(data.vc.get(RHO, 0, 0, 0), data.vc.get(RHO, 0, 0, beg));
        assert_eq!(data.vc.get(RHO, 0, 0, 1), data.vc.get(RHO, 0, 0, beg));
        let ni = data.grid.np_tot[0];
        assert_eq!(data.vc.get(RHO, 0, 0, ni - 1), data.vc.get(RHO, 0, 0, end - 1));
    }

    #[test]
    fn test_cell_center_field_rebuilt() {
        let mut data = block_1d(BoundaryPolicy::Periodic);
        fill_ramp(&mut data);
        // 胞心磁场放入垃圾，边界收尾必须重建
        let ni = data.grid.np_tot[0];
        for i in 0..ni {
            data.vc.set(BX1, 0, 0, i, -5.0);
        }
        set_boundary(&mut data, &mut NoopSetup, 0.0).unwrap();
        for i in 0..ni {
            assert!((data.vc.get(BX1, 0, 0, i) - 1.0).abs() < 1e-14);
        }
    }

    #[test]
    fn test_userdef_without_hook_is_unsupported() {
        let data = block_1d(BoundaryPolicy::Userdef);
        let err = validate_boundary_support(&data, &NoopSetup).unwrap_err();
        assert!(matches!(err, PhysicsError::UnsupportedBoundary { .. }));
    }
}
