// crates/mg_physics/src/integrator.rs

//! RK2 时间积分与 CFL 时间步控制
//!
//! Heun 形式的二阶强稳定保持 Runge-Kutta：
//!
//! ```text
//! U*      = Uⁿ + Δt L(Uⁿ)
//! Uⁿ⁺¹    = ½ Uⁿ + ½ (U* + Δt L(U*))
//! ```
//!
//! 每个阶段按方向执行 C1→C2→C3→C4 扫掠，随后 C5→C6→C7→C8；
//! 交错场与守恒量一同做凸组合。时间步取自第 1 阶段黎曼扫掠
//! 累加的逆时间步：dt = CFL / max(invDt)。
//!
//! 可恢复的物理失败（负密度/压强）触发回滚并折半 dt 重试，
//! 重试耗尽后错误原样上抛。

use mg_config::SolverConfig;
use mg_runtime::{Array4D, Real};

use crate::boundary::validate_boundary_support;
use crate::data::DataBlock;
use crate::error::{PhysicsError, PhysicsResult};
use crate::grid::{Direction, DIRECTIONS};
use crate::setup::Setup;
use crate::solver::Mhd;

/// dt 折半重试上限
const MAX_RETRY: u32 = 4;

/// 单步结果
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    /// 实际使用的时间步长
    pub dt: Real,
    /// 本步累加的最大逆时间步
    pub inv_dt_max: Real,
    /// dt 折半重试次数
    pub retries: u32,
}

/// RK2 积分器
pub struct Rk2 {
    cfl: Real,
    current_dt: Real,
    uc0: Array4D<Real>,
    vs0: Array4D<Real>,
    vc0: Array4D<Real>,
}

impl Rk2 {
    /// 创建积分器（缓冲区按数据块形状分配）
    pub fn new(config: &SolverConfig, data: &DataBlock) -> Self {
        let (nv, nk, nj, ni) = data.uc.shape();
        let (sv, sk, sj, si) = data.vs.shape();
        Self {
            cfl: config.time.cfl,
            current_dt: 0.0,
            uc0: Array4D::new(nv, nk, nj, ni),
            vs0: Array4D::new(sv, sk, sj, si),
            vc0: Array4D::new(nv, nk, nj, ni),
        }
    }

    /// 以初始状态的信号速度确定首个时间步
    pub fn prime(&mut self, mhd: &Mhd, data: &mut DataBlock) -> PhysicsResult<()> {
        data.zero_inv_dt();
        for d in 0..data.grid.dimensions {
            let dir = DIRECTIONS[d];
            mhd.extrapolate_prim_var(data, dir);
            mhd.calc_riemann_flux(data, dir)?;
        }
        let inv_max = data.max_inv_dt();
        self.current_dt = self.cfl / inv_max;
        Ok(())
    }

    /// 当前时间步长
    pub fn current_dt(&self) -> Real {
        self.current_dt
    }

    /// 手动设定时间步长（末步截断用）
    pub fn set_dt(&mut self, dt: Real) {
        self.current_dt = dt;
    }

    /// 推进一个完整时间步
    pub fn step(
        &mut self,
        mhd: &Mhd,
        data: &mut DataBlock,
        setup: &mut dyn Setup,
        t: Real,
    ) -> PhysicsResult<StepResult> {
        let mut dt = self.current_dt;
        let mut retries = 0;

        loop {
            self.uc0.copy_from(&data.uc);
            self.vs0.copy_from(&data.vs);
            self.vc0.copy_from(&data.vc);
            data.zero_inv_dt();

            match self.try_step(mhd, data, setup, t, dt) {
                Ok(()) => {
                    let inv_dt_max = data.max_inv_dt();
                    // 两个阶段各累加一次，折算回单阶段信号速度
                    self.current_dt = self.cfl / (0.5 * inv_dt_max);
                    return Ok(StepResult {
                        dt,
                        inv_dt_max,
                        retries,
                    });
                }
                Err(err @ PhysicsError::NonPhysicalState { .. }) => {
                    if retries >= MAX_RETRY {
                        return Err(err);
                    }
                    // 回滚并折半重试
                    data.uc.copy_from(&self.uc0);
                    data.vs.copy_from(&self.vs0);
                    data.vc.copy_from(&self.vc0);
                    dt *= 0.5;
                    retries += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn try_step(
        &mut self,
        mhd: &Mhd,
        data: &mut DataBlock,
        setup: &mut dyn Setup,
        t: Real,
        dt: Real,
    ) -> PhysicsResult<()> {
        // 第 1 阶段: U* = U⁰ + dt·L(U⁰)
        self.stage_sweeps(mhd, data, dt)?;
        finalize_stage(mhd, data, setup, t + dt)?;

        // 第 2 阶段: U* + dt·L(U*)，随后与 U⁰ 做凸组合
        self.stage_sweeps(mhd, data, dt)?;
        average_in_place(&mut data.uc, &self.uc0);
        average_in_place(&mut data.vs, &self.vs0);
        finalize_stage(mhd, data, setup, t + dt)?;
        Ok(())
    }

    /// 阶段的扫掠部分：C1(P→C)、逐方向 C2..C4，再 C5、C6
    fn stage_sweeps(&mut self, mhd: &Mhd, data: &mut DataBlock, dt: Real) -> PhysicsResult<()> {
        mhd.convert_prim_to_cons(data);
        for d in 0..data.grid.dimensions {
            let dir: Direction = DIRECTIONS[d];
            mhd.extrapolate_prim_var(data, dir);
            mhd.calc_riemann_flux(data, dir)?;
            mhd.calc_right_hand_side(data, dir, dt);
        }
        mhd.calc_corner_emf(data);
        mhd.evolve_mag_field(data, dt);
        Ok(())
    }
}

/// 阶段收尾：把交错场桥接回守恒表示，再转换并应用边界
///
/// 压强提取必须使用约束输运更新后的磁场，否则下一阶段的
/// 重组会让总能量漂移。顺序固定为 C7(i) → 同步 Uc 磁场通道 →
/// C1(C→P) → C8。
fn finalize_stage(
    mhd: &Mhd,
    data: &mut DataBlock,
    setup: &mut dyn Setup,
    t_stage: Real,
) -> PhysicsResult<()> {
    crate::reconcile::reconstruct_vc_field(data);
    sync_field_to_cons(data);
    mhd.convert_cons_to_prim(data)?;
    mhd.set_boundary(data, setup, t_stage)?;
    Ok(())
}

/// 交错演化的磁场通道：Uc ← Vc（两种表示下同值）
fn sync_field_to_cons(data: &mut DataBlock) {
    let dims = data.grid.dimensions;
    let (_, nk, nj, ni) = data.uc.shape();
    for d in 0..dims {
        let nv = crate::vars::BX1 + d;
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    data.uc.set(nv, k, j, i, data.vc.get(nv, k, j, i));
                }
            }
        }
    }
}

/// dst = ½(dst + src)
fn average_in_place(dst: &mut Array4D<Real>, src: &Array4D<Real>) {
    debug_assert_eq!(dst.shape(), src.shape());
    let (nv, nk, nj, ni) = dst.shape();
    for n in 0..nv {
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    dst.set(n, k, j, i, 0.5 * (dst.get(n, k, j, i) + src.get(n, k, j, i)));
                }
            }
        }
    }
}

// ============================================================
// 模拟门面
// ============================================================

/// 模拟：配置 + 数据块 + 求解器 + 积分器
pub struct Simulation<S: Setup> {
    /// 求解核心
    pub mhd: Mhd,
    /// 数据块
    pub data: DataBlock,
    /// 用户钩子
    pub setup: S,
    /// 积分器
    pub rk: Rk2,
    /// 当前时刻
    pub t: Real,
    /// 完成的步数
    pub steps: usize,
}

impl<S: Setup> Simulation<S> {
    /// 构建：校验、分配、初值、边界、首个 dt
    pub fn new(config: &SolverConfig, mut setup: S) -> PhysicsResult<Self> {
        let mhd = Mhd::init(config)?;
        let mut data = DataBlock::new(config)?;
        validate_boundary_support(&data, &setup)?;

        setup.init_flow(&mut data);
        mhd.set_boundary(&mut data, &mut setup, 0.0)?;

        let mut rk = Rk2::new(config, &data);
        rk.prime(&mhd, &mut data)?;

        Ok(Self {
            mhd,
            data,
            setup,
            rk,
            t: 0.0,
            steps: 0,
        })
    }

    /// 推进一步
    pub fn step(&mut self) -> PhysicsResult<StepResult> {
        let result = self.rk.step(&self.mhd, &mut self.data, &mut self.setup, self.t)?;
        self.t += result.dt;
        self.steps += 1;
        self.setup.make_analysis(&self.data, self.t);
        Ok(result)
    }

    /// 推进至 t_end（末步截断对齐）
    pub fn run_until(&mut self, t_end: Real) -> PhysicsResult<()> {
        while self.t < t_end - 1e-14 {
            let remaining = t_end - self.t;
            if self.rk.current_dt() > remaining {
                self.rk.set_dt(remaining);
            }
            self.step()?;
        }
        Ok(())
    }

    /// 活动区最大 |∇·B|
    pub fn max_div_b(&self) -> Real {
        self.mhd.check_div_b(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::*;
    use mg_config::{BoundaryConfig, BoundaryPolicy, SolverConfig};

    /// 均匀静止流场
    struct UniformSetup;
    impl Setup for UniformSetup {
        fn init_flow(&mut self, data: &mut DataBlock) {
            let g = &data.grid;
            let (nk, nj, ni) = (g.np_tot[2], g.np_tot[1], g.np_tot[0]);
            for k in 0..nk {
                for j in 0..nj {
                    for i in 0..ni {
                        data.vc.set(RHO, k, j, i, 1.0);
                        data.vc.set(PRS, k, j, i, 1.0);
                        data.vc.set(BX1, k, j, i, 1.0);
                    }
                }
            }
            for k in 0..nk {
                for j in 0..nj {
                    for i in 0..=ni {
                        data.vs.set(0, k, j, i, 1.0);
                    }
                }
            }
        }
    }

    fn config_1d() -> SolverConfig {
        let mut config = SolverConfig::default();
        config.grid.n = [32, 1, 1];
        config.grid.end = [1.0, 1.0, 1.0];
        config.boundary = BoundaryConfig::uniform(BoundaryPolicy::Periodic);
        config
    }

    #[test]
    fn test_prime_sets_cfl_dt() {
        let mut sim = Simulation::new(&config_1d(), UniformSetup).unwrap();
        // B_t = 0 → c_f = max(a, c_a) = √(5/3)；dt = cfl·dx/c_f
        let cf: Real = (5.0 / 3.0_f64).sqrt();
        let expected = 0.9 * (1.0 / 32.0) / cf;
        assert!((sim.rk.current_dt() - expected).abs() < 1e-12 * expected);
        let r = sim.step().unwrap();
        assert!(r.dt > 0.0);
        assert_eq!(r.retries, 0);
    }

    #[test]
    fn test_uniform_state_is_stationary() {
        let mut sim = Simulation::new(&config_1d(), UniformSetup).unwrap();
        for _ in 0..10 {
            sim.step().unwrap();
        }
        let g = sim.data.grid.clone();
        for i in g.beg[0]..g.end[0] {
            assert!((sim.data.vc.get(RHO, 0, 0, i) - 1.0).abs() < 1e-13);
            assert!(sim.data.vc.get(VX1, 0, 0, i).abs() < 1e-13);
        }
    }

    #[test]
    fn test_run_until_lands_exactly() {
        let mut sim = Simulation::new(&config_1d(), UniformSetup).unwrap();
        sim.run_until(0.05).unwrap();
        assert!((sim.t - 0.05).abs() < 1e-12);
    }
}
