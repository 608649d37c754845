// crates/mg_physics/src/solver.rs

//! 求解器门面
//!
//! 初始化期从配置选定黎曼求解器、重构阶数与状态方程，
//! 之后以 `(DataBlock, 方向?, dt?)` 的形式逐分量暴露双曲核心。
//! 积分器按阶段、按方向依次调用这些入口。

use mg_config::{ReconstructionOrder, SolverConfig, SolverKind};
use mg_runtime::Real;

use crate::boundary;
use crate::convert;
use crate::ct;
use crate::data::DataBlock;
use crate::divb;
use crate::emf;
use crate::eos::EquationOfState;
use crate::error::PhysicsResult;
use crate::grid::Direction;
use crate::reconstruct;
use crate::rhs;
use crate::riemann;
use crate::setup::Setup;

/// MHD 求解核心
#[derive(Debug, Clone)]
pub struct Mhd {
    solver: SolverKind,
    order: ReconstructionOrder,
    eos: EquationOfState,
}

impl Mhd {
    /// 由配置初始化（含配置校验）
    pub fn init(config: &SolverConfig) -> PhysicsResult<Self> {
        config.validate()?;
        Ok(Self {
            solver: config.solver,
            order: config.reconstruction,
            eos: EquationOfState::from_config(&config.hydro),
        })
    }

    /// 选定的黎曼求解器
    pub fn solver(&self) -> SolverKind {
        self.solver
    }

    /// 状态方程
    pub fn eos(&self) -> &EquationOfState {
        &self.eos
    }

    /// 调整绝热指数（等温闭合下无效果）
    pub fn set_gamma(&mut self, gamma: Real) {
        if let EquationOfState::Adiabatic { gamma: g } = &mut self.eos {
            *g = gamma;
        }
    }

    /// C1：守恒量 → 原始量（全块）
    pub fn convert_cons_to_prim(&self, data: &mut DataBlock) -> PhysicsResult<()> {
        convert::convert_cons_to_prim(data, &self.eos)
    }

    /// C1：原始量 → 守恒量（全块）
    pub fn convert_prim_to_cons(&self, data: &mut DataBlock) {
        convert::convert_prim_to_cons(data, &self.eos);
    }

    /// C2：方向 dir 的界面重构
    pub fn extrapolate_prim_var(&self, data: &mut DataBlock, dir: Direction) {
        reconstruct::extrapolate_prim_var(data, dir, self.order);
    }

    /// C3：方向 dir 的黎曼通量（含电动势捕获与逆时间步累加）
    pub fn calc_riemann_flux(&self, data: &mut DataBlock, dir: Direction) -> PhysicsResult<()> {
        riemann::calc_riemann_flux(data, dir, self.solver, &self.eos)
    }

    /// C4：方向 dir 的通量散度更新
    pub fn calc_right_hand_side(&self, data: &mut DataBlock, dir: Direction, dt: Real) {
        rhs::calc_right_hand_side(data, dir, dt);
    }

    /// C5：棱角电动势平均
    pub fn calc_corner_emf(&self, data: &mut DataBlock) {
        emf::calc_corner_emf(data);
    }

    /// C6：交错磁场演化
    pub fn evolve_mag_field(&self, data: &mut DataBlock, dt: Real) {
        ct::evolve_mag_field(data, dt);
    }

    /// C8：边界应用（以 C7 收尾）
    pub fn set_boundary(
        &self,
        data: &mut DataBlock,
        setup: &mut dyn Setup,
        t: Real,
    ) -> PhysicsResult<()> {
        boundary::set_boundary(data, setup, t)
    }

    /// 诊断：活动区最大 |∇·B|
    pub fn check_div_b(&self, data: &DataBlock) -> Real {
        divb::max_div_b(data)
    }
}
